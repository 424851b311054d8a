//! Database-backed tests; skipped unless `DATABASE_URL` points at a Postgres instance.
