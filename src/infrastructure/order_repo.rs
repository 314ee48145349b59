use std::collections::HashMap;
use std::panic::{self, AssertUnwindSafe};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use diesel::connection::{AnsiTransactionManager, TransactionManager};
use diesel::pg::PgConnection;
use diesel::prelude::*;

use crate::db::DbPool;
use crate::domain::errors::DomainError;
use crate::domain::order::{Order, OrderLine};
use crate::domain::ports::OrderRepository;
use crate::schema::{order_lines, orders};

use super::models::{NewOrderLineRow, NewOrderRow, OrderLineRow, OrderRow};

// ── Error conversions (infrastructure concern only) ──────────────────────────

impl From<diesel::result::Error> for DomainError {
    fn from(e: diesel::result::Error) -> Self {
        DomainError::Internal(e.to_string())
    }
}

impl From<r2d2::Error> for DomainError {
    fn from(e: r2d2::Error) -> Self {
        DomainError::Internal(e.to_string())
    }
}

// ── Cancellation ─────────────────────────────────────────────────────────────

/// Set once the async caller of a store call is dropped. Blocking work checks
/// it at statement boundaries and before commit.
#[derive(Debug, Clone, Default)]
pub(crate) struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub(crate) fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub(crate) fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }

    pub(crate) fn check(&self) -> Result<(), DomainError> {
        if self.is_cancelled() {
            Err(DomainError::Cancelled)
        } else {
            Ok(())
        }
    }
}

/// Cancels its token when dropped, including when the owning future is.
struct CancelOnDrop(CancelToken);

impl Drop for CancelOnDrop {
    fn drop(&mut self) {
        self.0.cancel();
    }
}

// ── Transactions ─────────────────────────────────────────────────────────────

/// Runs `body` inside a REPEATABLE READ transaction.
///
/// The transaction commits only when `body` returns `Ok` and `cancel` is still
/// unset. An `Err` rolls it back and is returned unchanged. A panic rolls it
/// back and is then resumed, so the caller observes the original fault.
pub(crate) fn atomically<T, F>(
    conn: &mut PgConnection,
    cancel: &CancelToken,
    body: F,
) -> Result<T, DomainError>
where
    F: FnOnce(&mut PgConnection) -> Result<T, DomainError>,
{
    let outcome = panic::catch_unwind(AssertUnwindSafe(|| {
        conn.build_transaction().repeatable_read().run(|conn| {
            cancel.check()?;
            let value = body(conn)?;
            cancel.check()?;
            Ok(value)
        })
    }));

    match outcome {
        Ok(Err(DomainError::Cancelled)) => {
            log::warn!("caller cancelled, transaction rolled back");
            Err(DomainError::Cancelled)
        }
        Ok(result) => result,
        Err(payload) => {
            if let Err(err) = AnsiTransactionManager::rollback_transaction(conn) {
                log::error!("rollback after panic failed: {err}");
            }
            panic::resume_unwind(payload)
        }
    }
}

// ── Repository ────────────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DieselOrderRepository {
    pool: DbPool,
}

impl DieselOrderRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Checks out a connection on the blocking pool and runs `f` with it.
    ///
    /// Dropping the returned future cancels the token handed to `f`; the
    /// blocking task itself cannot be aborted.
    async fn with_conn<T, F>(&self, f: F) -> Result<T, DomainError>
    where
        T: Send + 'static,
        F: FnOnce(&mut PgConnection, &CancelToken) -> Result<T, DomainError> + Send + 'static,
    {
        let pool = self.pool.clone();
        let cancel = CancelToken::default();
        let _guard = CancelOnDrop(cancel.clone());
        let joined = tokio::task::spawn_blocking(move || {
            let mut conn = pool.get()?;
            cancel.check()?;
            f(&mut *conn, &cancel)
        })
        .await;

        match joined {
            Ok(result) => result,
            Err(err) if err.is_panic() => panic::resume_unwind(err.into_panic()),
            Err(err) => Err(DomainError::Internal(err.to_string())),
        }
    }
}

pub(crate) fn insert_order(
    conn: &mut PgConnection,
    order: &Order,
    cancel: &CancelToken,
) -> Result<(), DomainError> {
    diesel::insert_into(orders::table)
        .values(&NewOrderRow::from(order))
        .execute(conn)?;

    cancel.check()?;

    // One multi-row insert for every line.
    diesel::insert_into(order_lines::table)
        .values(&NewOrderLineRow::for_order(order))
        .execute(conn)?;

    Ok(())
}

/// Rebuilds an aggregate through the validating constructors, so a stored row
/// that breaks an invariant is reported instead of returned.
fn rebuild(header: OrderRow, lines: Vec<OrderLineRow>) -> Result<Order, DomainError> {
    let corrupt = |source| DomainError::CorruptRecord {
        order_id: header.id.clone(),
        source,
    };
    let lines = lines
        .into_iter()
        .map(|line| OrderLine::new(line.count, line.catalog_item_id))
        .collect::<Result<Vec<_>, _>>()
        .map_err(corrupt)?;
    Order::new(
        Some(header.id.clone()),
        header.customer_id.clone(),
        Some(header.order_date),
        lines,
    )
    .map_err(corrupt)
}

#[async_trait]
impl OrderRepository for DieselOrderRepository {
    async fn create(&self, order: Order) -> Result<(), DomainError> {
        self.with_conn(move |conn, cancel| {
            atomically(conn, cancel, |conn| insert_order(conn, &order, cancel))
        })
        .await
    }

    async fn get(&self, id: &str) -> Result<Order, DomainError> {
        let id = id.to_string();
        self.with_conn(move |conn, cancel| {
            atomically(conn, cancel, |conn| {
                let header = orders::table
                    .find(&id)
                    .select(OrderRow::as_select())
                    .first(conn)
                    .optional()?;

                let Some(header) = header else {
                    return Err(DomainError::NotFound);
                };

                let lines = OrderLineRow::belonging_to(&header)
                    .select(OrderLineRow::as_select())
                    .order(order_lines::id.asc())
                    .load(conn)?;

                rebuild(header, lines)
            })
        })
        .await
    }

    async fn list(&self) -> Result<Vec<Order>, DomainError> {
        self.with_conn(|conn, _cancel| {
            let rows: Vec<(OrderRow, OrderLineRow)> = orders::table
                .inner_join(order_lines::table)
                .select((OrderRow::as_select(), OrderLineRow::as_select()))
                .order(order_lines::id.asc())
                .load(conn)?;

            // Group by header id in the order headers are first seen.
            let mut index: HashMap<String, usize> = HashMap::new();
            let mut grouped: Vec<(OrderRow, Vec<OrderLineRow>)> = Vec::new();
            for (header, line) in rows {
                match index.get(&header.id) {
                    Some(&pos) => grouped[pos].1.push(line),
                    None => {
                        index.insert(header.id.clone(), grouped.len());
                        grouped.push((header, vec![line]));
                    }
                }
            }

            grouped
                .into_iter()
                .map(|(header, lines)| rebuild(header, lines))
                .collect()
        })
        .await
    }

    async fn delete(&self, id: &str) -> Result<(), DomainError> {
        let id = id.to_string();
        self.with_conn(move |conn, cancel| {
            atomically(conn, cancel, |conn| {
                diesel::delete(order_lines::table.filter(order_lines::order_id.eq(&id)))
                    .execute(conn)?;
                cancel.check()?;
                diesel::delete(orders::table.find(&id)).execute(conn)?;
                Ok(())
            })
        })
        .await
    }
}
