//! Row shapes returned by the data store and their conversion into
//! domain entities.
//!
//! Column names are those of the store schema. A row that is missing a
//! required value or carries an unparseable timestamp is rejected with a
//! validation error naming the table and the offending column.

use chrono::{DateTime, NaiveDate, Utc};
use serde::Deserialize;
use serde_json::Value;

use crate::api::{
    ActivityLogEntry, AssignmentEvents, AssignmentId, FabricationRecord, Launch,
    LaunchAssignment, LaunchNumber, OldestRecord, Unit,
};
use crate::db::repository::{ErrorContext, RepositoryError, RepositoryResult};
use crate::models::time::parse_instant;

pub const LAUNCHES: &str = "lancamentos";
pub const UNITS: &str = "saass";
pub const ASSIGNMENTS: &str = "lancamentos_saass";
pub const DELIVERIES: &str = "entregas_lancamentos";
pub const RETURNS: &str = "retornos_lancamentos";
pub const ACTIVITY_VIEW: &str = "vw_logs_dashboard";

pub const LAUNCH_COLUMNS: &str = "numero_lancamento,descricao";
pub const UNIT_COLUMNS: &str = "numero_serie_saass,data_fabricacao,numero_serie_eletronica,numero_serie_hidrofone,numero_serie_pack_baterias,numero_serie_tubo";
pub const ASSIGNMENT_EVENT_COLUMNS: &str = "id_lancamento_saass,numero_lancamento,numero_serie_saass,entregas_lancamentos(data_hora_entrega),retornos_lancamentos(data_hora_retorno)";
pub const OLDEST_DELIVERY_COLUMNS: &str = "data_hora_entrega,lancamentos_saass(numero_lancamento)";

fn malformed(table: &str, column: &str, details: impl Into<String>) -> RepositoryError {
    RepositoryError::validation_with_context(
        format!("Malformed value in column {}", column),
        ErrorContext::new("decode_row")
            .with_entity(table)
            .with_details(details),
    )
}

fn instant(table: &str, column: &str, value: &str) -> RepositoryResult<DateTime<Utc>> {
    parse_instant(value).ok_or_else(|| malformed(table, column, value.to_string()))
}

fn date(table: &str, column: &str, value: &str) -> RepositoryResult<NaiveDate> {
    instant(table, column, value).map(|at| at.date_naive())
}

#[derive(Debug, Clone, Deserialize)]
pub struct LaunchRow {
    #[serde(rename = "numero_lancamento")]
    pub launch_number: i64,
    #[serde(rename = "descricao", default)]
    pub description: Option<String>,
}

impl TryFrom<LaunchRow> for Launch {
    type Error = RepositoryError;

    fn try_from(row: LaunchRow) -> RepositoryResult<Self> {
        Ok(Launch {
            launch_number: LaunchNumber(row.launch_number),
            description: row.description,
        })
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct UnitRow {
    #[serde(rename = "numero_serie_saass")]
    pub serial_number: String,
    #[serde(rename = "data_fabricacao", default)]
    pub fabricated_on: Option<String>,
    #[serde(rename = "numero_serie_eletronica", default)]
    pub electronics_serial: Option<String>,
    #[serde(rename = "numero_serie_hidrofone", default)]
    pub hydrophone_serial: Option<String>,
    #[serde(rename = "numero_serie_pack_baterias", default)]
    pub battery_pack_serial: Option<String>,
    #[serde(rename = "numero_serie_tubo", default)]
    pub tube_serial: Option<String>,
}

impl TryFrom<UnitRow> for Unit {
    type Error = RepositoryError;

    fn try_from(row: UnitRow) -> RepositoryResult<Self> {
        let fabricated_on = row
            .fabricated_on
            .as_deref()
            .map(|value| date(UNITS, "data_fabricacao", value))
            .transpose()?;
        Ok(Unit {
            serial_number: row.serial_number,
            fabricated_on,
            electronics_serial: row.electronics_serial,
            hydrophone_serial: row.hydrophone_serial,
            battery_pack_serial: row.battery_pack_serial,
            tube_serial: row.tube_serial,
        })
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct FabricationRow {
    #[serde(rename = "numero_serie_saass")]
    pub serial_number: String,
    #[serde(rename = "data_fabricacao")]
    pub fabricated_on: Option<String>,
}

impl TryFrom<FabricationRow> for FabricationRecord {
    type Error = RepositoryError;

    fn try_from(row: FabricationRow) -> RepositoryResult<Self> {
        let value = row
            .fabricated_on
            .ok_or_else(|| malformed(UNITS, "data_fabricacao", "null"))?;
        Ok(FabricationRecord {
            serial_number: row.serial_number,
            fabricated_on: date(UNITS, "data_fabricacao", &value)?,
        })
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct DeliveryTimeRow {
    #[serde(default)]
    pub data_hora_entrega: Option<String>,
}

impl DeliveryTimeRow {
    /// `None` when the row carries no timestamp.
    pub fn delivered_at(&self) -> RepositoryResult<Option<DateTime<Utc>>> {
        self.data_hora_entrega
            .as_deref()
            .map(|value| instant(DELIVERIES, "data_hora_entrega", value))
            .transpose()
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ReturnTimeRow {
    #[serde(default)]
    pub data_hora_retorno: Option<String>,
}

impl ReturnTimeRow {
    /// `None` when the row carries no timestamp.
    pub fn returned_at(&self) -> RepositoryResult<Option<DateTime<Utc>>> {
        self.data_hora_retorno
            .as_deref()
            .map(|value| instant(RETURNS, "data_hora_retorno", value))
            .transpose()
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct AssignmentEventsRow {
    pub id_lancamento_saass: i64,
    pub numero_lancamento: i64,
    pub numero_serie_saass: String,
    #[serde(default)]
    pub entregas_lancamentos: Vec<DeliveryTimeRow>,
    #[serde(default)]
    pub retornos_lancamentos: Vec<ReturnTimeRow>,
}

impl TryFrom<AssignmentEventsRow> for AssignmentEvents {
    type Error = RepositoryError;

    fn try_from(row: AssignmentEventsRow) -> RepositoryResult<Self> {
        // Embedded rows without a timestamp are skipped.
        let deliveries = row
            .entregas_lancamentos
            .iter()
            .filter_map(|r| r.delivered_at().transpose())
            .collect::<RepositoryResult<Vec<_>>>()?;
        let returns = row
            .retornos_lancamentos
            .iter()
            .filter_map(|r| r.returned_at().transpose())
            .collect::<RepositoryResult<Vec<_>>>()?;

        Ok(AssignmentEvents {
            assignment: LaunchAssignment {
                assignment_id: AssignmentId(row.id_lancamento_saass),
                launch_number: LaunchNumber(row.numero_lancamento),
                unit_serial: row.numero_serie_saass,
            },
            deliveries,
            returns,
        })
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct AssignmentLaunchRow {
    pub numero_lancamento: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OldestDeliveryRow {
    pub data_hora_entrega: String,
    #[serde(default)]
    pub lancamentos_saass: Option<AssignmentLaunchRow>,
}

impl TryFrom<OldestDeliveryRow> for OldestRecord {
    type Error = RepositoryError;

    fn try_from(row: OldestDeliveryRow) -> RepositoryResult<Self> {
        let launch = row
            .lancamentos_saass
            .ok_or_else(|| malformed(DELIVERIES, "lancamentos_saass", "missing assignment"))?;
        Ok(OldestRecord {
            launch_number: LaunchNumber(launch.numero_lancamento),
            delivered_at: instant(DELIVERIES, "data_hora_entrega", &row.data_hora_entrega)?,
        })
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ActivityRow {
    pub id_log: i64,
    pub data_hora: String,
    #[serde(default)]
    pub modulo: Option<String>,
    #[serde(default)]
    pub acao: Option<String>,
    #[serde(default)]
    pub entidade: Option<String>,
    #[serde(default)]
    pub id_entidade: Option<Value>,
    #[serde(default)]
    pub titulo: Option<String>,
    #[serde(default)]
    pub descricao: Option<String>,
    #[serde(default)]
    pub descricao_dashboard: Option<String>,
}

impl TryFrom<ActivityRow> for ActivityLogEntry {
    type Error = RepositoryError;

    fn try_from(row: ActivityRow) -> RepositoryResult<Self> {
        let entity_id = match row.id_entidade {
            None | Some(Value::Null) => None,
            Some(Value::String(s)) => Some(s),
            Some(other) => Some(other.to_string()),
        };
        // The dashboard description wins over the generic one.
        let description = row
            .descricao_dashboard
            .filter(|d| !d.trim().is_empty())
            .or(row.descricao);

        Ok(ActivityLogEntry {
            log_id: row.id_log,
            logged_at: instant(ACTIVITY_VIEW, "data_hora", &row.data_hora)?,
            module: row.modulo.unwrap_or_default(),
            action: row.acao.unwrap_or_default(),
            entity: row.entidade.unwrap_or_default(),
            entity_id,
            title: row.titulo,
            description,
        })
    }
}

/// Decode a JSON array of rows and convert each one.
pub fn decode_rows<R, T>(body: &str) -> RepositoryResult<Vec<T>>
where
    R: for<'de> Deserialize<'de>,
    T: TryFrom<R, Error = RepositoryError>,
{
    let rows: Vec<R> = serde_json::from_str(body)?;
    rows.into_iter().map(T::try_from).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_launch_row() {
        let launches: Vec<Launch> =
            decode_rows::<LaunchRow, Launch>(r#"[{"numero_lancamento": 3, "descricao": "Norte"}]"#)
                .unwrap();
        assert_eq!(launches, vec![Launch::new(3, "Norte")]);
    }

    #[test]
    fn test_unit_row_accepts_date_and_timestamp() {
        let units = decode_rows::<UnitRow, Unit>(
            r#"[
                {"numero_serie_saass": "S1", "data_fabricacao": "2024-05-02"},
                {"numero_serie_saass": "S2", "data_fabricacao": "2024-05-03T00:00:00+00:00",
                 "numero_serie_tubo": "T9"},
                {"numero_serie_saass": "S3", "data_fabricacao": null}
            ]"#,
        )
        .unwrap();
        assert_eq!(units[0].fabricated_on, NaiveDate::from_ymd_opt(2024, 5, 2));
        assert_eq!(units[1].fabricated_on, NaiveDate::from_ymd_opt(2024, 5, 3));
        assert_eq!(units[1].tube_serial.as_deref(), Some("T9"));
        assert!(units[2].fabricated_on.is_none());
    }

    #[test]
    fn test_malformed_timestamp_is_validation_error() {
        let result = decode_rows::<UnitRow, Unit>(
            r#"[{"numero_serie_saass": "S1", "data_fabricacao": "yesterday"}]"#,
        );
        match result {
            Err(RepositoryError::ValidationError { context, .. }) => {
                assert_eq!(context.entity.as_deref(), Some("saass"));
                assert_eq!(context.details.as_deref(), Some("yesterday"));
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_missing_required_column_is_validation_error() {
        let result = decode_rows::<LaunchRow, Launch>(r#"[{"descricao": "x"}]"#);
        assert!(matches!(result, Err(RepositoryError::ValidationError { .. })));
    }

    #[test]
    fn test_assignment_events_row_with_embeds() {
        let events = decode_rows::<AssignmentEventsRow, AssignmentEvents>(
            r#"[{
                "id_lancamento_saass": 11,
                "numero_lancamento": 4,
                "numero_serie_saass": "S1",
                "entregas_lancamentos": [{"data_hora_entrega": "2026-01-12T10:00:00"}],
                "retornos_lancamentos": []
            }]"#,
        )
        .unwrap();
        assert_eq!(events[0].assignment.assignment_id, AssignmentId(11));
        assert_eq!(
            events[0].latest_delivery(),
            Some(Utc.with_ymd_and_hms(2026, 1, 12, 10, 0, 0).unwrap())
        );
        assert!(events[0].returns.is_empty());
    }

    #[test]
    fn test_assignment_events_skip_null_timestamps() {
        let events = decode_rows::<AssignmentEventsRow, AssignmentEvents>(
            r#"[
                {"id_lancamento_saass": 1, "numero_lancamento": 2, "numero_serie_saass": "S1",
                 "entregas_lancamentos": [{"data_hora_entrega": "2026-01-05T12:00:00Z"},
                                          {"data_hora_entrega": null}],
                 "retornos_lancamentos": [{"data_hora_retorno": null}]},
                {"id_lancamento_saass": 2, "numero_lancamento": 2, "numero_serie_saass": "S2",
                 "entregas_lancamentos": [{"data_hora_entrega": "2026-01-06T12:00:00Z"}],
                 "retornos_lancamentos": [{"data_hora_retorno": "2026-01-08T12:00:00Z"}]}
            ]"#,
        )
        .unwrap();
        assert_eq!(events.len(), 2);
        assert_eq!(events[0].deliveries.len(), 1);
        assert!(events[0].returns.is_empty());
        assert_eq!(
            events[1].latest_return(),
            Some(Utc.with_ymd_and_hms(2026, 1, 8, 12, 0, 0).unwrap())
        );
    }

    #[test]
    fn test_unparseable_embedded_timestamp_is_still_rejected() {
        let result = decode_rows::<AssignmentEventsRow, AssignmentEvents>(
            r#"[{"id_lancamento_saass": 1, "numero_lancamento": 2, "numero_serie_saass": "S1",
                 "retornos_lancamentos": [{"data_hora_retorno": "soon"}]}]"#,
        );
        match result {
            Err(RepositoryError::ValidationError { context, .. }) => {
                assert_eq!(context.entity.as_deref(), Some(RETURNS));
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_oldest_delivery_row() {
        let records = decode_rows::<OldestDeliveryRow, OldestRecord>(
            r#"[{"data_hora_entrega": "2024-02-01T08:00:00Z",
                 "lancamentos_saass": {"numero_lancamento": 1}}]"#,
        )
        .unwrap();
        assert_eq!(records[0].launch_number, LaunchNumber(1));
    }

    #[test]
    fn test_activity_row_fallbacks() {
        let entries = decode_rows::<ActivityRow, ActivityLogEntry>(
            r#"[
                {"id_log": 5, "data_hora": "2026-01-20T09:00:00", "modulo": "saass",
                 "acao": "criar", "entidade": "SAASS", "id_entidade": "S-001",
                 "descricao": "generic", "descricao_dashboard": "SAASS S-001 created"},
                {"id_log": 6, "data_hora": "2026-01-20T09:05:00", "id_entidade": 42,
                 "descricao": "generic", "descricao_dashboard": ""}
            ]"#,
        )
        .unwrap();
        assert_eq!(entries[0].entity_id.as_deref(), Some("S-001"));
        assert_eq!(entries[0].description.as_deref(), Some("SAASS S-001 created"));
        assert_eq!(entries[1].entity_id.as_deref(), Some("42"));
        assert_eq!(entries[1].description.as_deref(), Some("generic"));
        assert_eq!(entries[1].action, "");
    }
}
