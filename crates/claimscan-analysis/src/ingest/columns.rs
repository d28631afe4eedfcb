//! Column-name normalization and alias resolution.

use std::sync::LazyLock;

use regex::Regex;

use claimscan_core::RecordTable;

static NON_WORD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^\w]+").expect("Invalid regex pattern"));

static UNDERSCORE_RUNS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"_+").expect("Invalid regex pattern"));

/// Normalize a header to lowercase snake_case.
///
/// `" Average Medicare Payment ($) "` → `average_medicare_payment`.
pub fn normalize_column_name(raw: &str) -> String {
    let name = raw.trim().replace('\u{feff}', "").to_lowercase();
    let name = NON_WORD.replace_all(&name, "_");
    let name = UNDERSCORE_RUNS.replace_all(&name, "_");
    name.trim_matches('_').to_string()
}

/// Compute renames that map the first present alias of each canonical
/// column onto the canonical name. Canonical columns with no alias in the
/// table produce nothing.
pub fn resolve_aliases(
    columns: &[String],
    aliases: &[(String, Vec<String>)],
) -> Vec<(String, String)> {
    aliases
        .iter()
        .filter_map(|(canonical, candidates)| {
            candidates
                .iter()
                .find(|c| columns.iter().any(|col| col == *c))
                .map(|found| (found.clone(), canonical.clone()))
        })
        .collect()
}

/// Normalize every header of `table`, then apply alias renames.
/// Returns the renames that were applied.
pub fn normalize_schema(
    table: &mut RecordTable,
    aliases: &[(String, Vec<String>)],
) -> Vec<(String, String)> {
    let normalized: Vec<(String, String)> = table
        .columns()
        .iter()
        .map(|c| (c.clone(), normalize_column_name(c)))
        .collect();
    table.rename_columns(&normalized);

    let renames = resolve_aliases(table.columns(), aliases);
    table.rename_columns(&renames);
    renames
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalizes_headers() {
        assert_eq!(normalize_column_name("\u{feff}HCPCS Code"), "hcpcs_code");
        assert_eq!(
            normalize_column_name(" Average Medicare Payment ($) "),
            "average_medicare_payment"
        );
        assert_eq!(normalize_column_name("Rndrng_Prvdr__Type"), "rndrng_prvdr_type");
        assert_eq!(normalize_column_name("tot-benes"), "tot_benes");
    }

    #[test]
    fn first_present_alias_wins() {
        let columns = vec!["hcpcs".to_string(), "hcpcs_code".to_string()];
        let aliases = vec![(
            "hcpcs_cd".to_string(),
            vec!["hcpcs_cd".into(), "hcpcs_code".into(), "hcpcs".into()],
        )];
        assert_eq!(
            resolve_aliases(&columns, &aliases),
            vec![("hcpcs_code".to_string(), "hcpcs_cd".to_string())]
        );
    }

    #[test]
    fn absent_canonical_is_skipped() {
        let aliases = vec![("npi".to_string(), vec!["rendering_npi".to_string()])];
        assert!(resolve_aliases(&["x".to_string()], &aliases).is_empty());
    }
}
