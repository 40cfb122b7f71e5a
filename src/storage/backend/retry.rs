//! 数据库操作重试
//!
//! 连接抖动、SQLite 写锁、MySQL/PostgreSQL 死锁时按指数退避重试，其余错误直接返回。

use sea_orm::DbErr;
use std::future::Future;
use std::time::Duration;
use tokio::time::sleep;
use tracing::{debug, warn};

/// 可重试的数据库错误码（MySQL 死锁/锁等待、PostgreSQL 序列化失败/死锁、SQLite BUSY/LOCKED）
const RETRYABLE_DB_CODES: &[&str] = &["1213", "1205", "40001", "40P01", "5", "6"];

/// 可重试的错误消息片段（小写）
const RETRYABLE_MESSAGES: &[&str] = &[
    "deadlock",
    "lock wait timeout",
    "database is locked",
    "serialization failure",
];

/// 判断数据库错误是否可重试
pub fn is_retryable_error(err: &DbErr) -> bool {
    use sea_orm::error::RuntimeErr;

    let runtime_err = match err {
        DbErr::ConnectionAcquire(_) | DbErr::Conn(_) => return true,
        DbErr::Exec(e) | DbErr::Query(e) => e,
        _ => return false,
    };

    match runtime_err {
        RuntimeErr::SqlxError(sqlx_err) => {
            if let Some(code) = sqlx_err.as_database_error().and_then(|db| db.code()) {
                return RETRYABLE_DB_CODES.contains(&code.as_ref());
            }
            message_is_retryable(&sqlx_err.to_string())
        }
        RuntimeErr::Internal(msg) => message_is_retryable(msg),
        #[allow(unreachable_patterns)]
        _ => false,
    }
}

fn message_is_retryable(msg: &str) -> bool {
    let lower = msg.to_lowercase();
    RETRYABLE_MESSAGES.iter().any(|m| lower.contains(m))
}

/// 重试配置
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RetryConfig {
    pub max_retries: u32,
    pub base_delay_ms: u64,
    pub max_delay_ms: u64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: 3,
            base_delay_ms: 100,
            max_delay_ms: 2000,
        }
    }
}

impl RetryConfig {
    /// 第 `attempt` 次重试前的等待时间（从 1 开始），附带 0-25% 抖动
    pub fn delay_for(&self, attempt: u32) -> Duration {
        use rand::RngExt;
        let exp = self
            .base_delay_ms
            .saturating_mul(2u64.saturating_pow(attempt.saturating_sub(1)));
        let capped = exp.min(self.max_delay_ms);
        let jitter = rand::rng().random_range(0..=capped / 4);
        Duration::from_millis(capped.saturating_add(jitter))
    }
}

/// 执行数据库操作，遇到可重试错误时按配置退避重试
pub async fn with_retry<T, F, Fut>(
    operation_name: &str,
    config: RetryConfig,
    mut operation: F,
) -> Result<T, DbErr>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, DbErr>>,
{
    let mut attempt = 0;
    loop {
        let err = match operation().await {
            Ok(value) => {
                if attempt > 0 {
                    debug!("'{}' succeeded after {} retries", operation_name, attempt);
                }
                return Ok(value);
            }
            Err(e) => e,
        };

        if attempt >= config.max_retries || !is_retryable_error(&err) {
            debug!("'{}' failed, giving up: {}", operation_name, err);
            return Err(err);
        }

        attempt += 1;
        let delay = config.delay_for(attempt);
        warn!(
            "'{}' failed (attempt {}/{}): {}; retrying in {:?}",
            operation_name,
            attempt,
            config.max_retries + 1,
            err,
            delay
        );
        sleep(delay).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::error::{ConnAcquireErr, RuntimeErr};
    use std::sync::atomic::{AtomicU32, Ordering};

    fn fast_config(max_retries: u32) -> RetryConfig {
        RetryConfig {
            max_retries,
            base_delay_ms: 5,
            max_delay_ms: 20,
        }
    }

    #[test]
    fn test_connection_errors_are_retryable() {
        assert!(is_retryable_error(&DbErr::ConnectionAcquire(
            ConnAcquireErr::Timeout
        )));
        assert!(is_retryable_error(&DbErr::Conn(RuntimeErr::Internal(
            "connection reset".to_string()
        ))));
    }

    #[test]
    fn test_sqlite_locked_message_is_retryable() {
        let err = DbErr::Exec(RuntimeErr::Internal("Database is locked".to_string()));
        assert!(is_retryable_error(&err));
    }

    #[test]
    fn test_constraint_violation_is_not_retryable() {
        let err = DbErr::Exec(RuntimeErr::Internal(
            "UNIQUE constraint failed: campaigns.slug".to_string(),
        ));
        assert!(!is_retryable_error(&err));
        assert!(!is_retryable_error(&DbErr::RecordNotFound("x".into())));
    }

    #[test]
    fn test_delay_grows_and_is_capped() {
        let config = RetryConfig::default();
        let first = config.delay_for(1).as_millis();
        assert!((100..=125).contains(&first));
        let third = config.delay_for(3).as_millis();
        assert!((400..=500).contains(&third));
        let late = config.delay_for(12).as_millis();
        assert!((2000..=2500).contains(&late));
    }

    #[tokio::test]
    async fn test_with_retry_recovers_from_transient_failures() {
        let calls = AtomicU32::new(0);
        let result = with_retry("lookup", fast_config(3), || {
            let n = calls.fetch_add(1, Ordering::SeqCst);
            async move {
                if n < 2 {
                    Err(DbErr::ConnectionAcquire(ConnAcquireErr::Timeout))
                } else {
                    Ok("ok")
                }
            }
        })
        .await;

        assert_eq!(result.unwrap(), "ok");
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_with_retry_stops_after_limit() {
        let calls = AtomicU32::new(0);
        let result: Result<(), DbErr> = with_retry("lookup", fast_config(1), || {
            calls.fetch_add(1, Ordering::SeqCst);
            async { Err(DbErr::ConnectionAcquire(ConnAcquireErr::Timeout)) }
        })
        .await;

        assert!(result.is_err());
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_with_retry_does_not_retry_logic_errors() {
        let calls = AtomicU32::new(0);
        let result: Result<(), DbErr> = with_retry("insert", fast_config(5), || {
            calls.fetch_add(1, Ordering::SeqCst);
            async { Err(DbErr::Custom("bad input".to_string())) }
        })
        .await;

        assert!(result.is_err());
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }
}
