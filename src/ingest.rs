use crate::{
    core::TimeKey,
    error::{RankraceError, RankraceResult},
    model::Observation,
};

/// Loader-facing record shape, one per dataset row.
///
/// Field aliases follow the headers of the datasets this engine grew up on
/// (`name,year,value`), so their JSON exports load without renaming. `value`
/// is kept raw and coerced leniently; `time` must be an orderable scalar (a
/// year, an epoch value) and is the one field with fatal error semantics.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct RawRecord {
    #[serde(alias = "name")]
    pub entity: String,
    #[serde(alias = "year")]
    pub time: f64,
    #[serde(default)]
    pub value: serde_json::Value,
}

/// Coerce a raw value field to a finite number; everything malformed reads
/// as 0 (missing, null, non-numeric strings, nested structures).
pub fn coerce_value(value: &serde_json::Value) -> f64 {
    match value {
        serde_json::Value::Number(n) => n.as_f64().filter(|v| v.is_finite()).unwrap_or(0.0),
        serde_json::Value::String(s) => s
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|v| v.is_finite())
            .unwrap_or(0.0),
        _ => 0.0,
    }
}

/// Convert raw records into observations.
///
/// Value coercion never fails; a non-finite time key rejects the whole
/// dataset before aggregation begins.
pub fn observations(records: Vec<RawRecord>) -> RankraceResult<Vec<Observation>> {
    records
        .into_iter()
        .map(|rec| {
            let time = TimeKey::new(rec.time).map_err(|_| {
                RankraceError::input(format!(
                    "record for '{}' has a non-finite time key",
                    rec.entity
                ))
            })?;
            let value = coerce_value(&rec.value);
            Ok(Observation::new(rec.entity, time, value))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn aliases_accept_original_headers() {
        let json = r#"[
            {"name": "Apple", "year": 2015, "value": 170.2},
            {"entity": "Google", "time": 2015, "value": "120.9"}
        ]"#;
        let records: Vec<RawRecord> = serde_json::from_str(json).unwrap();
        let obs = observations(records).unwrap();
        assert_eq!(obs[0].entity, "Apple");
        assert_eq!(obs[0].time, TimeKey(2015.0));
        assert_eq!(obs[0].value, 170.2);
        assert_eq!(obs[1].value, 120.9);
    }

    #[test]
    fn malformed_values_coerce_to_zero() {
        assert_eq!(coerce_value(&serde_json::json!("not a number")), 0.0);
        assert_eq!(coerce_value(&serde_json::json!(null)), 0.0);
        assert_eq!(coerce_value(&serde_json::json!(true)), 0.0);
        assert_eq!(coerce_value(&serde_json::json!([1, 2])), 0.0);
        assert_eq!(coerce_value(&serde_json::json!(" 7.5 ")), 7.5);
    }

    #[test]
    fn missing_value_field_reads_as_zero() {
        let json = r#"[{"name": "Apple", "year": 2015}]"#;
        let records: Vec<RawRecord> = serde_json::from_str(json).unwrap();
        let obs = observations(records).unwrap();
        assert_eq!(obs[0].value, 0.0);
    }

    #[test]
    fn non_finite_time_rejects_dataset() {
        let records = vec![RawRecord {
            entity: "Apple".to_string(),
            time: f64::NAN,
            value: serde_json::json!(1.0),
        }];
        let err = observations(records).unwrap_err();
        assert!(err.to_string().contains("input error:"));
    }
}
