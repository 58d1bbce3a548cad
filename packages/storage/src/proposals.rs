// ABOUTME: Proposal store: create with unique numbering, atomic view tracking, status updates, listing
// ABOUTME: Timestamps are RFC 3339 UTC text so lexical order matches chronological order

use chrono::{DateTime, NaiveDate, SecondsFormat, Utc};
use serde::Serialize;
use skz_core::constants::PROPOSAL_NUMBER_MAX_ATTEMPTS;
use skz_core::{
    generate_proposal_id, generate_proposal_number, valid_until, Money, NewProposal,
    ProposalRecord, ProposalStatus,
};
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};
use tracing::{debug, info, warn};

use crate::error::{StorageError, StorageResult};
use crate::listing::{like_pattern, ListQuery, ProposalSummary, StatusCounts};

const PROPOSAL_COLUMNS: &str = r#"
    id, proposal_number,
    client_name, client_email, client_phone, client_company, client_segment,
    category, main_service, service_option, challenges, timeline, budget,
    has_branding, delivery_method, wants_meeting, observations,
    send_by_email, send_by_whatsapp,
    recommended_package, alternative_packages, combos, selected_package,
    status, view_count, created_at, updated_at, valid_until,
    last_viewed_at, email_sent_at
"#;

/// Result of recording one view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewOutcome {
    pub view_count: i64,
    pub status: ProposalStatus,
    /// True only for the view that moved the proposal from SENT to VIEWED
    pub first_view: bool,
}

fn timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Millis, true)
}

fn parse_timestamp(value: &str) -> StorageResult<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| StorageError::InvalidData(format!("timestamp '{}': {}", value, e)))
}

fn parse_optional_timestamp(value: Option<String>) -> StorageResult<Option<DateTime<Utc>>> {
    value.as_deref().map(parse_timestamp).transpose()
}

fn parse_enum<T: std::str::FromStr<Err = String>>(value: &str) -> StorageResult<T> {
    value.parse().map_err(StorageError::InvalidData)
}

fn is_unique_violation(error: &sqlx::Error) -> bool {
    matches!(error, sqlx::Error::Database(db) if db.is_unique_violation())
}

#[derive(Clone)]
pub struct ProposalStorage {
    pool: SqlitePool,
}

impl ProposalStorage {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Persist a new proposal with status SENT and a fresh proposal number.
    pub async fn create(&self, new: &NewProposal) -> StorageResult<ProposalRecord> {
        self.create_with(new, Utc::now(), |date| {
            generate_proposal_number(date, &mut rand::thread_rng())
        })
        .await
    }

    /// Like [`create`](Self::create) with an explicit clock and number source.
    /// A number already taken is retried with the next one from `next_number`.
    pub async fn create_with<F>(
        &self,
        new: &NewProposal,
        now: DateTime<Utc>,
        mut next_number: F,
    ) -> StorageResult<ProposalRecord>
    where
        F: FnMut(NaiveDate) -> String + Send,
    {
        let recommendation = &new.recommendation;
        let mut record = ProposalRecord {
            id: generate_proposal_id(),
            proposal_number: String::new(),
            client_name: new.client_name.clone(),
            client_email: new.client_email.clone(),
            client_phone: new.client_phone.clone(),
            client_company: new.client_company.clone(),
            client_segment: new.client_segment.clone(),
            category: new.category,
            main_service: new.main_service.clone(),
            service_option: new.service_option.clone(),
            challenges: new.challenges.clone(),
            timeline: new.timeline,
            budget: new.budget.clone(),
            has_branding: new.has_branding.clone(),
            delivery_method: new.delivery_method.clone(),
            wants_meeting: new.wants_meeting,
            observations: new.observations.clone(),
            send_by_email: new.send_by_email,
            send_by_whatsapp: new.send_by_whatsapp,
            recommended_package_json: serde_json::to_string(&recommendation.recommended)?,
            alternative_packages_json: serde_json::to_string(&recommendation.alternatives)?,
            combos_json: serde_json::to_string(&recommendation.combos)?,
            selected_package: None,
            status: ProposalStatus::Sent,
            view_count: 0,
            created_at: now,
            updated_at: now,
            valid_until: valid_until(now),
            last_viewed_at: None,
            email_sent_at: None,
        };

        for attempt in 1..=PROPOSAL_NUMBER_MAX_ATTEMPTS {
            record.proposal_number = next_number(now.date_naive());
            match self.insert(&record).await {
                Ok(()) => {
                    info!(
                        proposal_id = %record.id,
                        proposal_number = %record.proposal_number,
                        "Created proposal"
                    );
                    return Ok(record);
                }
                Err(e) if is_unique_violation(&e) => {
                    warn!(
                        proposal_number = %record.proposal_number,
                        attempt,
                        "Proposal number already taken, retrying"
                    );
                }
                Err(e) => return Err(e.into()),
            }
        }

        Err(StorageError::ProposalNumberExhausted(PROPOSAL_NUMBER_MAX_ATTEMPTS))
    }

    async fn insert(&self, record: &ProposalRecord) -> Result<(), sqlx::Error> {
        let challenges = serde_json::to_string(&record.challenges).map_err(|e| sqlx::Error::Encode(Box::new(e)))?;
        let delivery_method =
            serde_json::to_string(&record.delivery_method).map_err(|e| sqlx::Error::Encode(Box::new(e)))?;

        sqlx::query(&format!(
            "INSERT INTO proposals ({}) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15, \
             ?16, ?17, ?18, ?19, ?20, ?21, ?22, ?23, ?24, ?25, ?26, ?27, ?28, ?29, ?30)",
            PROPOSAL_COLUMNS
        ))
        .bind(&record.id)
        .bind(&record.proposal_number)
        .bind(&record.client_name)
        .bind(&record.client_email)
        .bind(&record.client_phone)
        .bind(&record.client_company)
        .bind(&record.client_segment)
        .bind(record.category.as_str())
        .bind(&record.main_service)
        .bind(&record.service_option)
        .bind(&challenges)
        .bind(record.timeline.as_str())
        .bind(&record.budget)
        .bind(&record.has_branding)
        .bind(&delivery_method)
        .bind(record.wants_meeting)
        .bind(&record.observations)
        .bind(record.send_by_email)
        .bind(record.send_by_whatsapp)
        .bind(&record.recommended_package_json)
        .bind(&record.alternative_packages_json)
        .bind(&record.combos_json)
        .bind(&record.selected_package)
        .bind(record.status.as_str())
        .bind(record.view_count)
        .bind(timestamp(record.created_at))
        .bind(timestamp(record.updated_at))
        .bind(timestamp(record.valid_until))
        .bind(record.last_viewed_at.map(timestamp))
        .bind(record.email_sent_at.map(timestamp))
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    pub async fn find(&self, id: &str) -> StorageResult<Option<ProposalRecord>> {
        let row = sqlx::query(&format!("SELECT {} FROM proposals WHERE id = ?1", PROPOSAL_COLUMNS))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        row.map(row_to_proposal).transpose()
    }

    pub async fn get(&self, id: &str) -> StorageResult<ProposalRecord> {
        self.find(id)
            .await?
            .ok_or_else(|| StorageError::NotFound(id.to_string()))
    }

    /// Counts one view. In a single transaction: SENT becomes VIEWED (only from SENT),
    /// the counter is incremented, and `last_viewed_at` is stamped.
    /// Unknown ids change nothing and return `NotFound`.
    pub async fn record_view(&self, id: &str, now: DateTime<Utc>) -> StorageResult<ViewOutcome> {
        let at = timestamp(now);
        let mut tx = self.pool.begin().await?;

        let transitioned = sqlx::query(
            "UPDATE proposals SET status = 'VIEWED' WHERE id = ?1 AND status = 'SENT'",
        )
        .bind(id)
        .execute(&mut *tx)
        .await?
        .rows_affected()
            == 1;

        let row = sqlx::query(
            r#"
            UPDATE proposals
            SET view_count = view_count + 1, last_viewed_at = ?1, updated_at = ?1
            WHERE id = ?2
            RETURNING view_count, status
            "#,
        )
        .bind(&at)
        .bind(id)
        .fetch_optional(&mut *tx)
        .await?;

        let Some(row) = row else {
            tx.rollback().await?;
            return Err(StorageError::NotFound(id.to_string()));
        };
        let outcome = ViewOutcome {
            view_count: row.try_get("view_count")?,
            status: parse_enum(&row.try_get::<String, _>("status")?)?,
            first_view: transitioned,
        };
        tx.commit().await?;

        debug!(
            proposal_id = %id,
            view_count = outcome.view_count,
            first_view = outcome.first_view,
            "Recorded proposal view"
        );
        Ok(outcome)
    }

    /// Overwrites the status (no transition rules) and, when given, the selected package.
    pub async fn update_status(
        &self,
        id: &str,
        status: ProposalStatus,
        selected_package: Option<&str>,
        now: DateTime<Utc>,
    ) -> StorageResult<ProposalRecord> {
        let result = sqlx::query(
            r#"
            UPDATE proposals
            SET status = ?1, selected_package = COALESCE(?2, selected_package), updated_at = ?3
            WHERE id = ?4
            "#,
        )
        .bind(status.as_str())
        .bind(selected_package)
        .bind(timestamp(now))
        .bind(id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(StorageError::NotFound(id.to_string()));
        }
        info!(proposal_id = %id, status = %status, "Updated proposal status");
        self.get(id).await
    }

    pub async fn mark_email_sent(&self, id: &str, now: DateTime<Utc>) -> StorageResult<()> {
        let at = timestamp(now);
        let result = sqlx::query(
            "UPDATE proposals SET email_sent_at = ?1, updated_at = ?1 WHERE id = ?2",
        )
        .bind(&at)
        .bind(id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(StorageError::NotFound(id.to_string()));
        }
        Ok(())
    }

    /// Filtered, sorted page of summaries plus the total matching the filters.
    pub async fn list(&self, query: &ListQuery) -> StorageResult<(Vec<ProposalSummary>, i64)> {
        let mut where_clause = String::from(" WHERE 1=1");
        let search = query
            .search
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(like_pattern);

        if query.status.is_some() {
            where_clause.push_str(" AND status = ?");
        }
        if search.is_some() {
            where_clause.push_str(
                " AND (client_name LIKE ? ESCAPE '\\' OR client_email LIKE ? ESCAPE '\\' \
                 OR client_company LIKE ? ESCAPE '\\' OR proposal_number LIKE ? ESCAPE '\\')",
            );
        }

        let count_sql = format!("SELECT COUNT(*) FROM proposals{}", where_clause);
        let list_sql = format!(
            r#"
            SELECT id, proposal_number, client_name, client_email, client_company,
                   main_service, service_option, status, selected_package, view_count,
                   created_at, valid_until, last_viewed_at, email_sent_at,
                   CASE WHEN json_valid(recommended_package)
                        THEN CAST(COALESCE(json_extract(recommended_package, '$.price'), 0) AS INTEGER)
                        ELSE 0 END AS recommended_price
            FROM proposals{}
            ORDER BY {} {}, id ASC
            LIMIT ? OFFSET ?
            "#,
            where_clause,
            query.sort_by.column(),
            query.sort_order.keyword()
        );

        let mut count_query = sqlx::query_scalar::<_, i64>(&count_sql);
        let mut list_query = sqlx::query(&list_sql);
        if let Some(status) = query.status {
            count_query = count_query.bind(status.as_str());
            list_query = list_query.bind(status.as_str());
        }
        if let Some(pattern) = &search {
            for _ in 0..4 {
                count_query = count_query.bind(pattern.clone());
                list_query = list_query.bind(pattern.clone());
            }
        }
        list_query = list_query.bind(query.limit).bind(query.offset);

        let total = count_query.fetch_one(&self.pool).await?;
        let rows = list_query.fetch_all(&self.pool).await?;
        let items = rows
            .into_iter()
            .map(row_to_summary)
            .collect::<StorageResult<Vec<_>>>()?;

        Ok((items, total))
    }

    pub async fn status_counts(&self) -> StorageResult<StatusCounts> {
        let rows = sqlx::query("SELECT status, COUNT(*) AS count FROM proposals GROUP BY status")
            .fetch_all(&self.pool)
            .await?;

        let mut counts = StatusCounts::default();
        for row in rows {
            let status: ProposalStatus = parse_enum(&row.try_get::<String, _>("status")?)?;
            counts.add(status, row.try_get("count")?);
        }
        Ok(counts)
    }
}

fn row_to_proposal(row: SqliteRow) -> StorageResult<ProposalRecord> {
    Ok(ProposalRecord {
        id: row.try_get("id")?,
        proposal_number: row.try_get("proposal_number")?,
        client_name: row.try_get("client_name")?,
        client_email: row.try_get("client_email")?,
        client_phone: row.try_get("client_phone")?,
        client_company: row.try_get("client_company")?,
        client_segment: row.try_get("client_segment")?,
        category: parse_enum(&row.try_get::<String, _>("category")?)?,
        main_service: row.try_get("main_service")?,
        service_option: row.try_get("service_option")?,
        challenges: serde_json::from_str(&row.try_get::<String, _>("challenges")?)?,
        timeline: parse_enum(&row.try_get::<String, _>("timeline")?)?,
        budget: row.try_get("budget")?,
        has_branding: row.try_get("has_branding")?,
        delivery_method: serde_json::from_str(&row.try_get::<String, _>("delivery_method")?)?,
        wants_meeting: row.try_get("wants_meeting")?,
        observations: row.try_get("observations")?,
        send_by_email: row.try_get("send_by_email")?,
        send_by_whatsapp: row.try_get("send_by_whatsapp")?,
        recommended_package_json: row.try_get("recommended_package")?,
        alternative_packages_json: row.try_get("alternative_packages")?,
        combos_json: row.try_get("combos")?,
        selected_package: row.try_get("selected_package")?,
        status: parse_enum(&row.try_get::<String, _>("status")?)?,
        view_count: row.try_get("view_count")?,
        created_at: parse_timestamp(&row.try_get::<String, _>("created_at")?)?,
        updated_at: parse_timestamp(&row.try_get::<String, _>("updated_at")?)?,
        valid_until: parse_timestamp(&row.try_get::<String, _>("valid_until")?)?,
        last_viewed_at: parse_optional_timestamp(row.try_get("last_viewed_at")?)?,
        email_sent_at: parse_optional_timestamp(row.try_get("email_sent_at")?)?,
    })
}

fn row_to_summary(row: SqliteRow) -> StorageResult<ProposalSummary> {
    Ok(ProposalSummary {
        id: row.try_get("id")?,
        proposal_number: row.try_get("proposal_number")?,
        client_name: row.try_get("client_name")?,
        client_email: row.try_get("client_email")?,
        client_company: row.try_get("client_company")?,
        main_service: row.try_get("main_service")?,
        service_option: row.try_get("service_option")?,
        status: parse_enum(&row.try_get::<String, _>("status")?)?,
        selected_package: row.try_get("selected_package")?,
        view_count: row.try_get("view_count")?,
        recommended_price: Money::from_centavos(row.try_get("recommended_price")?),
        created_at: parse_timestamp(&row.try_get::<String, _>("created_at")?)?,
        valid_until: parse_timestamp(&row.try_get::<String, _>("valid_until")?)?,
        last_viewed_at: parse_optional_timestamp(row.try_get("last_viewed_at")?)?,
        email_sent_at: parse_optional_timestamp(row.try_get("email_sent_at")?)?,
    })
}
