use crate::domain::entities::{Contact, ContactDraft};
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::ports::contact_repository::ContactRepository;
use crate::infrastructure::persistence::Database;
use async_trait::async_trait;
use sqlx::{any::AnyRow, AnyConnection, Row};
use time::format_description::well_known::Rfc3339;

const CONTACT_COLUMNS: &str = "id, name, phone_numbers, emails, addresses, socials, \
     is_bookmarked, created_time, updated_time";

#[async_trait]
impl ContactRepository for Database {
    async fn list_contacts(&self) -> DomainResult<Vec<Contact>> {
        let rows = sqlx::query(&format!(
            "SELECT {} FROM contacts ORDER BY id",
            CONTACT_COLUMNS
        ))
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(contact_from_row).collect()
    }

    async fn get_contact_by_id(&self, id: i64) -> DomainResult<Contact> {
        let mut conn = self.pool.acquire().await?;
        fetch_contact(&mut conn, id).await
    }

    async fn create_contact(&self, draft: &ContactDraft) -> DomainResult<Contact> {
        let now = now_timestamp()?;
        let mut tx = self.pool.begin().await?;

        let row = sqlx::query(
            "INSERT INTO contacts
                (name, phone_numbers, emails, addresses, socials, is_bookmarked, created_time, updated_time)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?)
             RETURNING id",
        )
        .bind(&draft.name)
        .bind(encode_list(&draft.phone_numbers)?)
        .bind(encode_list(&draft.emails)?)
        .bind(encode_list(&draft.addresses)?)
        .bind(encode_list(&draft.socials)?)
        .bind(draft.is_bookmarked as i64)
        .bind(&now)
        .bind(&now)
        .fetch_one(&mut *tx)
        .await?;
        let id: i64 = row.try_get("id")?;

        claim_phone_numbers(&mut tx, id, draft).await?;

        // Dropping `tx` on any earlier `?` rolls the insert back
        tx.commit().await?;

        tracing::info!("Contact created: id={}", id);
        Ok(Contact {
            id,
            name: draft.name.clone(),
            phone_numbers: draft.phone_numbers.clone(),
            emails: draft.emails.clone(),
            addresses: draft.addresses.clone(),
            socials: draft.socials.clone(),
            is_bookmarked: draft.is_bookmarked,
            created_time: now.clone(),
            updated_time: now,
        })
    }

    async fn update_contact(&self, id: i64, draft: &ContactDraft) -> DomainResult<Contact> {
        let now = now_timestamp()?;
        let mut tx = self.pool.begin().await?;

        // Write first so the transaction takes the write lock up front
        let result = sqlx::query(
            "UPDATE contacts
             SET name = ?, phone_numbers = ?, emails = ?, addresses = ?, socials = ?,
                 is_bookmarked = ?, updated_time = ?
             WHERE id = ?",
        )
        .bind(&draft.name)
        .bind(encode_list(&draft.phone_numbers)?)
        .bind(encode_list(&draft.emails)?)
        .bind(encode_list(&draft.addresses)?)
        .bind(encode_list(&draft.socials)?)
        .bind(draft.is_bookmarked as i64)
        .bind(&now)
        .bind(id)
        .execute(&mut *tx)
        .await?;

        if result.rows_affected() == 0 {
            return Err(contact_not_found());
        }

        sqlx::query("DELETE FROM contact_phone_numbers WHERE contact_id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        claim_phone_numbers(&mut tx, id, draft).await?;

        let contact = fetch_contact(&mut tx, id).await?;
        tx.commit().await?;

        tracing::info!("Contact updated: id={}", id);
        Ok(contact)
    }

    async fn set_bookmark(&self, id: i64, is_bookmarked: bool) -> DomainResult<Contact> {
        let now = now_timestamp()?;
        let mut tx = self.pool.begin().await?;

        let result = sqlx::query(
            "UPDATE contacts SET is_bookmarked = ?, updated_time = ? WHERE id = ?",
        )
        .bind(is_bookmarked as i64)
        .bind(&now)
        .bind(id)
        .execute(&mut *tx)
        .await?;

        if result.rows_affected() == 0 {
            return Err(contact_not_found());
        }

        let contact = fetch_contact(&mut tx, id).await?;
        tx.commit().await?;

        tracing::info!("Contact bookmark set: id={}, is_bookmarked={}", id, is_bookmarked);
        Ok(contact)
    }

    async fn delete_contact(&self, id: i64) -> DomainResult<()> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("DELETE FROM contact_phone_numbers WHERE contact_id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        let result = sqlx::query("DELETE FROM contacts WHERE id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        if result.rows_affected() == 0 {
            return Err(contact_not_found());
        }

        tx.commit().await?;

        tracing::info!("Contact deleted: id={}", id);
        Ok(())
    }

    async fn find_phone_owner(
        &self,
        phone_number: &str,
        excluding: Option<i64>,
    ) -> DomainResult<Option<i64>> {
        let row = sqlx::query(
            "SELECT contact_id
             FROM contact_phone_numbers
             WHERE phone_number = ? AND (? IS NULL OR contact_id != ?)
             LIMIT 1",
        )
        .bind(phone_number)
        .bind(excluding)
        .bind(excluding)
        .fetch_optional(&self.pool)
        .await?;

        match row {
            Some(row) => Ok(Some(row.try_get("contact_id")?)),
            None => Ok(None),
        }
    }
}

async fn fetch_contact(conn: &mut AnyConnection, id: i64) -> DomainResult<Contact> {
    let row = sqlx::query(&format!(
        "SELECT {} FROM contacts WHERE id = ?",
        CONTACT_COLUMNS
    ))
    .bind(id)
    .fetch_optional(&mut *conn)
    .await?;

    match row {
        Some(row) => contact_from_row(&row),
        None => Err(contact_not_found()),
    }
}

/// Records ownership of every distinct phone number of `draft`.
///
/// The primary key on `phone_number` rejects numbers held by another contact,
/// even when a concurrent writer slipped past the service-level check.
async fn claim_phone_numbers(
    conn: &mut AnyConnection,
    contact_id: i64,
    draft: &ContactDraft,
) -> DomainResult<()> {
    for phone in draft.distinct_phone_numbers() {
        let inserted = sqlx::query(
            "INSERT INTO contact_phone_numbers (phone_number, contact_id) VALUES (?, ?)",
        )
        .bind(phone)
        .bind(contact_id)
        .execute(&mut *conn)
        .await;

        match inserted {
            Ok(_) => {}
            Err(sqlx::Error::Database(db_err)) if db_err.is_unique_violation() => {
                return Err(DomainError::Conflict(format!(
                    "Phone number {} is already in use",
                    phone
                )));
            }
            Err(e) => return Err(e.into()),
        }
    }

    Ok(())
}

fn contact_from_row(row: &AnyRow) -> DomainResult<Contact> {
    let is_bookmarked: i64 = row.try_get("is_bookmarked")?;

    Ok(Contact {
        id: row.try_get("id")?,
        name: row.try_get("name")?,
        phone_numbers: decode_list(row.try_get("phone_numbers")?)?,
        emails: decode_list(row.try_get("emails")?)?,
        addresses: decode_list(row.try_get("addresses")?)?,
        socials: decode_list(row.try_get("socials")?)?,
        is_bookmarked: is_bookmarked != 0,
        created_time: row.try_get("created_time")?,
        updated_time: row.try_get("updated_time")?,
    })
}

fn encode_list(values: &[String]) -> DomainResult<String> {
    serde_json::to_string(values)
        .map_err(|e| DomainError::Internal(format!("Failed to encode list column: {}", e)))
}

fn decode_list(raw: String) -> DomainResult<Vec<String>> {
    serde_json::from_str(&raw)
        .map_err(|e| DomainError::Internal(format!("Corrupt list column: {}", e)))
}

fn now_timestamp() -> DomainResult<String> {
    time::OffsetDateTime::now_utc()
        .format(&Rfc3339)
        .map_err(|e| DomainError::Internal(format!("Failed to format timestamp: {}", e)))
}

fn contact_not_found() -> DomainError {
    DomainError::NotFound("Contact not found".to_string())
}
