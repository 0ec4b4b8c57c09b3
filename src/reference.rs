use diesel::prelude::*;
use diesel::PgConnection;

use crate::error::AppResult;

const REFERENCE_PREFIX: &str = "REF";

/// Draws the next case id from the table's sequence. Deriving the reference
/// number from this id makes assignment race-free: the sequence never hands
/// out the same value twice, so two concurrent creations can never collide
/// even before either row is visible.
pub fn next_case_id(conn: &mut PgConnection) -> AppResult<i64> {
    use diesel::dsl::sql;
    use diesel::sql_types::BigInt;

    let id = diesel::select(sql::<BigInt>("nextval('cases_id_seq')")).get_result(conn)?;
    Ok(id)
}

/// Formats the human-facing reference for a case id: `REF` plus a 5-digit
/// zero-padded suffix. Ids beyond 99999 widen naturally.
pub fn format_reference(case_id: i64) -> String {
    format!("{REFERENCE_PREFIX}{case_id:05}")
}
