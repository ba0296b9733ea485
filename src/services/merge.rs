//! Per-column combination rules for partial attempt writes.
//!
//! Every write path (violations, uploads, section results) goes through the
//! one statement rendered here, so a partial update can never clobber a
//! sibling's fields and concurrent writers serialize on the database-native
//! upsert instead of an application-level read-modify-write.

use std::sync::OnceLock;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum MergeRule {
    /// A non-null incoming value wins; null preserves the stored value.
    /// Counters are last-write-wins because the client sends authoritative
    /// cumulative counts; media URLs are overwrite-only-if-new-non-null.
    Overwrite,
    /// Concatenate onto the stored jsonb array, treating null as empty.
    /// No dedup key exists, so a retried call duplicates entries.
    Append,
}

pub(crate) const MERGE_COLUMNS: &[(&str, MergeRule)] = &[
    ("tab_switches", MergeRule::Overwrite),
    ("inactivities", MergeRule::Overwrite),
    ("face_not_visible", MergeRule::Overwrite),
    ("audio_url", MergeRule::Overwrite),
    ("video_url", MergeRule::Overwrite),
    ("qa_data", MergeRule::Append),
    ("results_data", MergeRule::Append),
];

const TABLE: &str = "test_attempts";

/// The single atomic upsert every attempt write uses. Binds are
/// $1 candidate_id, $2 question_set_id, then one bind per entry of
/// `MERGE_COLUMNS` in order.
pub(crate) fn upsert_statement() -> &'static str {
    static SQL: OnceLock<String> = OnceLock::new();
    SQL.get_or_init(build_upsert_statement).as_str()
}

fn build_upsert_statement() -> String {
    let columns: Vec<&str> = MERGE_COLUMNS.iter().map(|(name, _)| *name).collect();

    let values: Vec<String> = MERGE_COLUMNS
        .iter()
        .enumerate()
        .map(|(i, (_, rule))| {
            let bind = format!("${}", i + 3);
            match rule {
                // Raw binds so EXCLUDED can distinguish "absent" from a value.
                MergeRule::Overwrite => bind,
                MergeRule::Append => format!("COALESCE({}, '[]'::jsonb)", bind),
            }
        })
        .collect();

    let updates: Vec<String> = MERGE_COLUMNS
        .iter()
        .map(|(name, rule)| match rule {
            MergeRule::Overwrite => {
                format!("{c} = COALESCE(EXCLUDED.{c}, {t}.{c})", c = name, t = TABLE)
            }
            MergeRule::Append => format!(
                "{c} = COALESCE({t}.{c}, '[]'::jsonb) || COALESCE(EXCLUDED.{c}, '[]'::jsonb)",
                c = name,
                t = TABLE
            ),
        })
        .collect();

    format!(
        "INSERT INTO {t} (candidate_id, question_set_id, {cols}) \
         VALUES ($1, $2, {vals}) \
         ON CONFLICT (candidate_id, question_set_id) DO UPDATE SET {sets}, updated_at = NOW()",
        t = TABLE,
        cols = columns.join(", "),
        vals = values.join(", "),
        sets = updates.join(", ")
    )
}
