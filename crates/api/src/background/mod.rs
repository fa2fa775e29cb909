//! Background tasks.
//!
//! The collector is an explicit object owned by `main` and shared with the
//! handlers through [`AppState`](crate::state::AppState). Its schedule is
//! stopped with a [`CancellationToken`](tokio_util::sync::CancellationToken).

pub mod collector;
