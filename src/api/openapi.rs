use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::{
    api::models::ErrorResponse,
    core::models::{
        Balance, NewParticipant, NewTransaction, Participant, Transaction, TransactionType, TransactionUpdate,
        User, UserBalance,
    },
};

#[derive(OpenApi)]
#[openapi(
    paths(
        super::handlers::get_balance,
        super::handlers::get_group_balance,
        super::handlers::list_group_transactions,
        super::handlers::create_transaction,
        super::handlers::get_transaction,
        super::handlers::update_transaction,
        super::handlers::delete_transaction
    ),
    components(schemas(
        Balance,
        UserBalance,
        User,
        Transaction,
        TransactionType,
        Participant,
        NewTransaction,
        NewParticipant,
        TransactionUpdate,
        ErrorResponse
    )),
    modifiers(&BearerAuth),
    info(
        title = "Splitledger API",
        description = "API for recording shared expenses and querying balances between group members",
        version = "0.1.0"
    )
)]
pub struct ApiDoc;

struct BearerAuth;

impl Modify for BearerAuth {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "Bearer",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}
