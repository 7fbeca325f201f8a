//! Bounded condition polling.

use std::future::Future;
use std::time::Duration;

use tokio::time::Instant;

use crate::error::{Error, Result};

/// How long to poll and how often.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WaitOptions {
	pub timeout: Duration,
	pub interval: Duration,
}

impl WaitOptions {
	pub fn new(timeout: Duration, interval: Duration) -> Self {
		Self { timeout, interval }
	}
}

impl Default for WaitOptions {
	fn default() -> Self {
		Self {
			timeout: Duration::from_secs(10),
			interval: Duration::from_millis(100),
		}
	}
}

/// Polls `check` until it yields `Some`, an error, or the timeout elapses.
///
/// `check` always runs at least once, and once more at the deadline, so a
/// zero timeout degenerates to a single check.
///
/// # Errors
///
/// Propagates errors from `check`; returns [`Error::Timeout`] naming
/// `description` when the condition never holds.
pub async fn poll_until<T, F, Fut>(description: &str, options: WaitOptions, mut check: F) -> Result<T>
where
	F: FnMut() -> Fut,
	Fut: Future<Output = Result<Option<T>>>,
{
	let deadline = Instant::now() + options.timeout;

	loop {
		if let Some(value) = check().await? {
			return Ok(value);
		}

		let now = Instant::now();
		if now >= deadline {
			return Err(Error::Timeout(format!(
				"{description} (waited {}ms)",
				options.timeout.as_millis()
			)));
		}

		let remaining = deadline - now;
		tokio::time::sleep(options.interval.min(remaining)).await;
	}
}

#[cfg(test)]
mod tests {
	use std::sync::Arc;
	use std::sync::atomic::{AtomicUsize, Ordering};

	use super::*;

	fn fast(timeout_ms: u64) -> WaitOptions {
		WaitOptions::new(Duration::from_millis(timeout_ms), Duration::from_millis(5))
	}

	#[tokio::test]
	async fn returns_once_condition_holds() {
		let calls = Arc::new(AtomicUsize::new(0));
		let counter = Arc::clone(&calls);

		let value = poll_until("third call", fast(1_000), move || {
			let counter = Arc::clone(&counter);
			async move {
				let n = counter.fetch_add(1, Ordering::SeqCst) + 1;
				Ok((n == 3).then_some(n))
			}
		})
		.await
		.unwrap();

		assert_eq!(value, 3);
		assert_eq!(calls.load(Ordering::SeqCst), 3);
	}

	#[tokio::test]
	async fn times_out_with_description() {
		let err = poll_until::<(), _, _>("menu to become visible", fast(30), || async { Ok(None) })
			.await
			.unwrap_err();

		assert!(err.is_timeout());
		assert!(err.to_string().contains("menu to become visible"));
	}

	#[tokio::test]
	async fn zero_timeout_checks_once() {
		let calls = Arc::new(AtomicUsize::new(0));
		let counter = Arc::clone(&calls);

		let result = poll_until::<(), _, _>("never", fast(0), move || {
			counter.fetch_add(1, Ordering::SeqCst);
			async { Ok(None) }
		})
		.await;

		assert!(result.is_err());
		assert_eq!(calls.load(Ordering::SeqCst), 1);
	}

	#[tokio::test]
	async fn check_errors_propagate_immediately() {
		let err = poll_until::<(), _, _>("lookup", fast(1_000), || async {
			Err(Error::ElementNotFound(".dropdown".into()))
		})
		.await
		.unwrap_err();

		assert!(err.is_element_not_found());
	}
}
