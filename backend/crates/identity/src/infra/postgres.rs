//! PostgreSQL Account Store

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use sqlx::types::Json;
use uuid::Uuid;

use crate::domain::entity::account::Account;
use crate::domain::repository::{AccountRepository, InsertOutcome, UpdateOutcome};
use crate::domain::value_object::{
    account_id::AccountId, address::Address, cart_entry::CartEntry, credential::StoredCredential,
    display_name::DisplayName, email::Email, origin::AccountOrigin, phone_number::PhoneNumber,
    product_id::ProductId,
};
use crate::error::{IdentityError, IdentityResult};

/// PostgreSQL unique-violation error code
const UNIQUE_VIOLATION: &str = "23505";

/// PostgreSQL-backed account store
#[derive(Clone)]
pub struct PgAccountStore {
    pool: PgPool,
}

impl PgAccountStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

impl AccountRepository for PgAccountStore {
    async fn insert(&self, account: &Account) -> IdentityResult<InsertOutcome> {
        let result = sqlx::query(
            r#"
            INSERT INTO accounts (
                account_id,
                email,
                display_name,
                phone_number,
                credential_hash,
                origin,
                wishlist,
                cart,
                addresses,
                version,
                created_at,
                updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
            "#,
        )
        .bind(account.account_id.as_uuid())
        .bind(account.email.as_str())
        .bind(account.display_name.as_str())
        .bind(account.phone_number.as_ref().map(|n| n.as_str()))
        .bind(account.credential.as_ref().map(|c| c.as_phc_string()))
        .bind(account.origin.id())
        .bind(Json(&account.wishlist))
        .bind(Json(&account.cart))
        .bind(Json(&account.addresses))
        .bind(account.version)
        .bind(account.created_at)
        .bind(account.updated_at)
        .execute(&self.pool)
        .await;

        match result {
            Ok(_) => Ok(InsertOutcome::Inserted),
            Err(sqlx::Error::Database(db_err))
                if db_err.code().as_deref() == Some(UNIQUE_VIOLATION) =>
            {
                Ok(InsertOutcome::DuplicateEmail)
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn find_by_id(&self, account_id: &AccountId) -> IdentityResult<Option<Account>> {
        let row = sqlx::query_as::<_, AccountRow>(
            r#"
            SELECT
                account_id,
                email,
                display_name,
                phone_number,
                credential_hash,
                origin,
                wishlist,
                cart,
                addresses,
                version,
                created_at,
                updated_at
            FROM accounts
            WHERE account_id = $1
            "#,
        )
        .bind(account_id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;

        row.map(|r| r.into_account()).transpose()
    }

    async fn find_by_email(&self, email: &Email) -> IdentityResult<Option<Account>> {
        let row = sqlx::query_as::<_, AccountRow>(
            r#"
            SELECT
                account_id,
                email,
                display_name,
                phone_number,
                credential_hash,
                origin,
                wishlist,
                cart,
                addresses,
                version,
                created_at,
                updated_at
            FROM accounts
            WHERE email = $1
            "#,
        )
        .bind(email.as_str())
        .fetch_optional(&self.pool)
        .await?;

        row.map(|r| r.into_account()).transpose()
    }

    async fn update(&self, account: &Account) -> IdentityResult<UpdateOutcome> {
        // Conditional on the version read by the caller; email, origin, and
        // credential are immutable after creation and are not written here
        let affected = sqlx::query(
            r#"
            UPDATE accounts SET
                display_name = $3,
                phone_number = $4,
                wishlist = $5,
                cart = $6,
                addresses = $7,
                version = version + 1,
                updated_at = $8
            WHERE account_id = $1 AND version = $2
            "#,
        )
        .bind(account.account_id.as_uuid())
        .bind(account.version)
        .bind(account.display_name.as_str())
        .bind(account.phone_number.as_ref().map(|n| n.as_str()))
        .bind(Json(&account.wishlist))
        .bind(Json(&account.cart))
        .bind(Json(&account.addresses))
        .bind(account.updated_at)
        .execute(&self.pool)
        .await?
        .rows_affected();

        if affected == 1 {
            return Ok(UpdateOutcome::Applied);
        }

        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM accounts WHERE account_id = $1)",
        )
        .bind(account.account_id.as_uuid())
        .fetch_one(&self.pool)
        .await?;

        if exists {
            Ok(UpdateOutcome::VersionConflict)
        } else {
            Ok(UpdateOutcome::Missing)
        }
    }
}

// ============================================================================
// Row Types for sqlx mapping
// ============================================================================

#[derive(sqlx::FromRow)]
struct AccountRow {
    account_id: Uuid,
    email: String,
    display_name: String,
    phone_number: Option<String>,
    credential_hash: Option<String>,
    origin: i16,
    wishlist: Json<Vec<ProductId>>,
    cart: Json<Vec<CartEntry>>,
    addresses: Json<Vec<Address>>,
    version: i64,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl AccountRow {
    fn into_account(self) -> IdentityResult<Account> {
        let origin = AccountOrigin::from_id(self.origin)
            .ok_or_else(|| IdentityError::Internal(format!("Invalid origin: {}", self.origin)))?;

        let credential = self
            .credential_hash
            .map(StoredCredential::from_phc_string)
            .transpose()
            .map_err(|e| IdentityError::Internal(e.to_string()))?;

        Ok(Account {
            account_id: AccountId::from_uuid(self.account_id),
            email: Email::from_db(self.email),
            display_name: DisplayName::from_db(self.display_name),
            phone_number: self.phone_number.map(PhoneNumber::from_db),
            credential,
            origin,
            wishlist: self.wishlist.0,
            cart: self.cart.0,
            addresses: self.addresses.0,
            version: self.version,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}
