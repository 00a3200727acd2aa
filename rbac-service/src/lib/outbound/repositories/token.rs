use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::PgPool;
use sqlx::Row;

use crate::domain::token::errors::TokenError;
use crate::domain::token::models::NewToken;
use crate::domain::token::models::Token;
use crate::domain::token::models::TokenId;
use crate::domain::token::models::TokenType;
use crate::domain::token::ports::TokenRepository;
use crate::domain::user::models::UserId;

pub struct PostgresTokenRepository {
    pool: PgPool,
}

impl PostgresTokenRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn row_to_token(row: &PgRow) -> Result<Token, TokenError> {
        let token_type: String = row.try_get("token_type").map_err(database_error)?;

        Ok(Token {
            id: TokenId(row.try_get("id").map_err(database_error)?),
            token: row.try_get("token").map_err(database_error)?,
            token_type: token_type.parse::<TokenType>()?,
            expired: row.try_get("expired").map_err(database_error)?,
            revoked: row.try_get("revoked").map_err(database_error)?,
            user_id: UserId(row.try_get("user_id").map_err(database_error)?),
        })
    }
}

fn database_error(e: sqlx::Error) -> TokenError {
    TokenError::DatabaseError(e.to_string())
}

#[async_trait]
impl TokenRepository for PostgresTokenRepository {
    async fn insert(&self, token: NewToken) -> Result<Token, TokenError> {
        let row = sqlx::query(
            r#"
            INSERT INTO tokens (token, token_type, expired, revoked, user_id)
            VALUES ($1, $2, FALSE, FALSE, $3)
            RETURNING id
            "#,
        )
        .bind(&token.token)
        .bind(token.token_type.as_str())
        .bind(token.user_id.0)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if let Some(db_err) = e.as_database_error() {
                if db_err.is_unique_violation() && db_err.constraint() == Some("tokens_token_key")
                {
                    return TokenError::DuplicateToken;
                }
            }
            database_error(e)
        })?;

        let id: i64 = row.try_get("id").map_err(database_error)?;

        Ok(token.with_id(TokenId(id)))
    }

    async fn find_by_token(&self, token: &str) -> Result<Option<Token>, TokenError> {
        let row = sqlx::query(
            r#"
            SELECT id, token, token_type, expired, revoked, user_id
            FROM tokens
            WHERE token = $1
            "#,
        )
        .bind(token)
        .fetch_optional(&self.pool)
        .await
        .map_err(database_error)?;

        row.as_ref().map(Self::row_to_token).transpose()
    }

    async fn find_live_by_user(&self, user_id: &UserId) -> Result<Vec<Token>, TokenError> {
        let rows = sqlx::query(
            r#"
            SELECT id, token, token_type, expired, revoked, user_id
            FROM tokens
            WHERE user_id = $1 AND NOT expired AND NOT revoked
            ORDER BY id
            "#,
        )
        .bind(user_id.0)
        .fetch_all(&self.pool)
        .await
        .map_err(database_error)?;

        rows.iter().map(Self::row_to_token).collect()
    }

    async fn update_all(&self, tokens: &[Token]) -> Result<(), TokenError> {
        let mut tx = self.pool.begin().await.map_err(database_error)?;

        for token in tokens {
            sqlx::query(
                r#"
                UPDATE tokens
                SET expired = $2, revoked = $3
                WHERE id = $1
                "#,
            )
            .bind(token.id.0)
            .bind(token.expired)
            .bind(token.revoked)
            .execute(&mut *tx)
            .await
            .map_err(database_error)?;
        }

        tx.commit().await.map_err(database_error)?;

        Ok(())
    }
}
