pub mod balance;
pub mod debt_line;
pub mod group;
pub mod transaction;
pub mod user;

pub use balance::{Balance, UserBalance};
pub use debt_line::DebtLine;
pub use group::Group;
pub use transaction::{
    NewParticipant, NewTransaction, Participant, Transaction, TransactionType, TransactionUpdate,
};
pub use user::User;
