pub mod client;
pub mod fixtures;
pub mod specs;

/// Invoke `$mac!(module::name)` for every E2E spec.
///
/// This is the **single source of truth** for the spec list. Adding a new
/// spec here automatically registers it in `tests/server.rs`.
#[macro_export]
macro_rules! for_each_spec {
    ($mac:ident) => {
        // health (1)
        $mac!(health::health_check);

        // auth (4)
        $mac!(auth::register);
        $mac!(auth::register_duplicate_username);
        $mac!(auth::login_round_trip);
        $mac!(auth::verify_rejects_garbage_token);

        // employees (4)
        $mac!(employees::create_and_get);
        $mac!(employees::duplicate_email_conflict);
        $mac!(employees::bulk_upload_skips_duplicates);
        $mac!(employees::goal_progress_derives_status);

        // calendar (2)
        $mac!(calendar::list_returns_envelope);
        $mac!(calendar::reset_reseeds_samples);

        // bank accounts (1)
        $mac!(employees::primary_account_is_exclusive);
    };
}
