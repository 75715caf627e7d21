//! GraphQL client for integration testing.
//!
//! Executes queries directly against the schema without HTTP overhead.

use juniper::Variables;
use serde_json::Value;
use sqlx::PgPool;

use server_core::common::{AccountId, Role};
use server_core::server::graphql::{create_schema, GraphQLContext, Schema};
use server_core::server::middleware::AuthUser;

/// GraphQL client for executing queries and mutations in tests.
pub struct GraphQLClient {
    schema: Schema,
    context: GraphQLContext,
}

/// Result of a GraphQL execution.
#[derive(Debug)]
pub struct GraphQLResult {
    pub data: Option<Value>,
    pub errors: Vec<String>,
}

impl GraphQLResult {
    /// Returns true if the execution had no errors.
    pub fn is_ok(&self) -> bool {
        self.errors.is_empty()
    }

    /// Unwraps the data, panicking if there were errors.
    pub fn unwrap(self) -> Value {
        if !self.errors.is_empty() {
            panic!("GraphQL errors: {:?}", self.errors);
        }
        self.data.expect("No data returned")
    }

    /// Gets a value at the given JSON path.
    ///
    /// # Example
    /// ```ignore
    /// let status = result.get("createBooking.status");
    /// ```
    pub fn get(&self, path: &str) -> Value {
        let data = self.data.as_ref().expect("No data returned");
        let mut current = data;
        for key in path.split('.') {
            current = &current[key];
        }
        current.clone()
    }
}

impl GraphQLClient {
    /// Client with no authenticated caller.
    pub fn anonymous(pool: PgPool) -> Self {
        Self {
            schema: create_schema(),
            context: GraphQLContext::new(pool, None),
        }
    }

    /// Client authenticated as `account_id` with `role`, as if the JWT
    /// middleware had verified an identity-provider token.
    pub fn authenticated(pool: PgPool, account_id: AccountId, role: Role) -> Self {
        Self {
            schema: create_schema(),
            context: GraphQLContext::new(pool, Some(AuthUser { account_id, role })),
        }
    }

    /// Execute a query or mutation against the schema.
    pub async fn execute(&self, query: &str) -> GraphQLResult {
        let result =
            juniper::execute(query, None, &self.schema, &Variables::new(), &self.context).await;

        match result {
            Ok((data, errors)) => GraphQLResult {
                data: serde_json::to_value(&data).ok(),
                errors: errors
                    .into_iter()
                    .map(|e| e.error().message().to_string())
                    .collect(),
            },
            Err(e) => GraphQLResult {
                data: None,
                errors: vec![e.to_string()],
            },
        }
    }
}
