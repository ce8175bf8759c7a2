//! Offline verification of a JSON chain dump.
use anyhow::{bail, Result};
use hashchain_core::{validate::check_next_block, Block};
use serde::Serialize;
use serde_json::Value;

#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct Verdict {
    pub position: usize,
    pub valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

/// Accepts either a bare array of blocks or an object with a `chain` array,
/// which is what `hashchain demo --format json` prints.
pub fn blocks_from_json(text: &str) -> Result<Vec<Value>> {
    let value: Value = serde_json::from_str(text)?;
    match value {
        Value::Array(items) => Ok(items),
        Value::Object(mut obj) => match obj.remove("chain") {
            Some(Value::Array(items)) => Ok(items),
            _ => bail!("expected a `chain` array"),
        },
        _ => bail!("expected a JSON array of blocks"),
    }
}

/// One verdict per non-genesis position. A malformed element fails its own
/// position and leaves its successor without a predecessor to check against.
pub fn verify_values(values: &[Value]) -> Vec<Verdict> {
    let blocks: Vec<Result<Block, String>> = values
        .iter()
        .map(|v| Block::from_value(v).map_err(|e| e.to_string()))
        .collect();

    let mut verdicts = Vec::new();
    if let Some(Err(reason)) = blocks.first() {
        verdicts.push(Verdict {
            position: 0,
            valid: false,
            reason: Some(reason.clone()),
        });
    }

    for (i, pair) in blocks.windows(2).enumerate() {
        let outcome = match (&pair[0], &pair[1]) {
            (_, Err(reason)) => Err(reason.clone()),
            (Err(_), Ok(_)) => Err("predecessor is malformed".to_string()),
            (Ok(previous), Ok(candidate)) => {
                check_next_block(candidate, previous).map_err(|r| r.to_string())
            }
        };
        verdicts.push(Verdict {
            position: i + 1,
            valid: outcome.is_ok(),
            reason: outcome.err(),
        });
    }
    verdicts
}

#[cfg(test)]
mod tests {
    use super::*;
    use hashchain_core::Chain;
    use serde_json::json;

    fn dump() -> Vec<Value> {
        let mut chain = Chain::with_genesis_at(1_600_000_000_000);
        chain.append_at("Hello", 1_600_000_001_000).unwrap();
        chain.append_at("Bye", 1_600_000_002_000).unwrap();
        chain
            .iter()
            .map(|b| serde_json::to_value(b).unwrap())
            .collect()
    }

    #[test]
    fn valid_dump_verifies() {
        let verdicts = verify_values(&dump());
        assert_eq!(verdicts.len(), 2);
        assert!(verdicts.iter().all(|v| v.valid && v.reason.is_none()));
    }

    #[test]
    fn malformed_element_fails_itself_and_orphans_successor() {
        let mut values = dump();
        values[1]["index"] = json!("one");
        let verdicts = verify_values(&values);
        assert!(!verdicts[0].valid);
        assert!(verdicts[0].reason.as_deref().unwrap().contains("index"));
        assert_eq!(
            verdicts[1].reason.as_deref(),
            Some("predecessor is malformed")
        );
    }

    #[test]
    fn malformed_genesis_is_reported_at_position_zero() {
        let mut values = dump();
        values[0] = json!(42);
        let verdicts = verify_values(&values);
        assert_eq!(verdicts[0].position, 0);
        assert!(!verdicts[0].valid);
        assert_eq!(verdicts.len(), 3);
    }

    #[test]
    fn tampered_data_reports_hash_mismatch() {
        let mut values = dump();
        values[2]["data"] = json!("Buy");
        let verdicts = verify_values(&values);
        assert!(verdicts[0].valid);
        assert!(!verdicts[1].valid);
        assert!(verdicts[1].reason.as_deref().unwrap().contains("recomputed"));
    }

    #[test]
    fn accepts_demo_envelope() {
        let text = json!({ "chain": dump(), "verdicts": [] }).to_string();
        assert_eq!(blocks_from_json(&text).unwrap().len(), 3);
        assert!(blocks_from_json("{\"blocks\": []}").is_err());
        assert!(blocks_from_json("3").is_err());
    }
}
