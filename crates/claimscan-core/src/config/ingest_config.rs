//! Ingestion configuration: canonical column aliases.

use serde::{Deserialize, Serialize};

/// One canonical column and the normalized names accepted for it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AliasSpec {
    pub canonical: String,
    pub aliases: Vec<String>,
}

impl AliasSpec {
    pub fn new(canonical: impl Into<String>, aliases: &[&str]) -> Self {
        Self {
            canonical: canonical.into(),
            aliases: aliases.iter().map(|a| a.to_string()).collect(),
        }
    }
}

/// Configuration for raw-input ingestion.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct IngestConfig {
    /// Remove exact duplicate rows. Default: true.
    pub drop_duplicates: Option<bool>,
    /// `[[ingest.aliases]]` entries, resolved in file order. Replaces the
    /// built-in table when non-empty.
    pub aliases: Vec<AliasSpec>,
}

impl IngestConfig {
    /// Returns the effective alias table, canonical columns in resolution order.
    pub fn effective_aliases(&self) -> Vec<(String, Vec<String>)> {
        if !self.aliases.is_empty() {
            return self
                .aliases
                .iter()
                .map(|a| (a.canonical.clone(), a.aliases.clone()))
                .collect();
        }
        default_aliases()
            .iter()
            .map(|(canonical, aliases)| {
                (
                    canonical.to_string(),
                    aliases.iter().map(|a| a.to_string()).collect(),
                )
            })
            .collect()
    }

    /// Returns whether duplicates are dropped, defaulting to true.
    pub fn effective_drop_duplicates(&self) -> bool {
        self.drop_duplicates.unwrap_or(true)
    }
}

/// Built-in aliases for the Medicare physician/supplier billing extract.
pub fn default_aliases() -> &'static [(&'static str, &'static [&'static str])] {
    &[
        ("rndrng_npi", &["rndrng_npi", "rendering_npi", "npi"]),
        (
            "rndrng_prvdr_type",
            &["rndrng_prvdr_type", "provider_type", "provider_type_desc", "prvdr_type"],
        ),
        ("hcpcs_cd", &["hcpcs_cd", "hcpcs_code", "hcpcs"]),
        (
            "hcpcs_desc",
            &["hcpcs_desc", "hcpcs_description", "hcpcs_desc_txt", "hcpcs_description_txt"],
        ),
        ("hcpcs_drug_ind", &["hcpcs_drug_ind", "drug_ind", "hcpcs_drug_indicator"]),
        ("place_of_srvc", &["place_of_srvc", "place_of_service", "pos", "place_of_svc"]),
        (
            "tot_srvcs",
            &["tot_srvcs", "total_services", "tot_srvs", "line_srvc_cnt", "line_service_cnt"],
        ),
        ("tot_benes", &["tot_benes", "total_beneficiaries", "bene_unique_cnt", "bene_cnt"]),
        (
            "avg_sbmtd_chrg_amt",
            &[
                "avg_sbmtd_chrg",
                "average_submitted_charge_amount",
                "avg_sbmtd_chrg_amt",
                "average_submitted_charge_amt",
                "avg_submitted_charge_amt",
            ],
        ),
        (
            "avg_mdcr_alowd_amt",
            &[
                "avg_mdcr_alowd_amt",
                "average_medicare_allowed_amount",
                "avg_mdcr_allowed_amt",
                "average_medicare_allowed_amt",
            ],
        ),
        (
            "avg_mdcr_pymt_amt",
            &[
                "avg_mdcr_pymt_amt",
                "average_medicare_payment_amount",
                "avg_mdcr_payment_amt",
                "average_medicare_payment_amt",
            ],
        ),
        (
            "avg_mdcr_stdzd_amt",
            &[
                "avg_mdcr_stdzd_amt",
                "average_medicare_standardized_amount",
                "avg_mdcr_standardized_amt",
                "average_medicare_standardized_amt",
            ],
        ),
    ]
}
