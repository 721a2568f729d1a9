use cosmwasm_std::StdError;
use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum ContractError {
    #[error("{0}")]
    Std(#[from] StdError),

    #[error("{0}")]
    Base(#[from] cw721_base::ContractError),

    #[error("Unauthorized: only the vault can perform this action")]
    Unauthorized,

    #[error("Token {token_id} is not owned by {owner}")]
    NotTokenOwner { token_id: String, owner: String },

    #[error("Token {token_id} already minted")]
    Claimed { token_id: String },

    #[error("Collection has been superseded by {to}; burn to migrate")]
    MigratingOut { to: String },

    #[error("Collection is not migrating out")]
    NotMigrating,
}
