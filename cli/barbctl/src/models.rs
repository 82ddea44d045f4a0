//! Backend response bodies.

use serde::{Deserialize, Serialize};
use tabled::Tabled;

/// Acknowledgement returned by write endpoints.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OkResponse {
    #[serde(default)]
    pub ok: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
}

/// Body of `GET /api/check_cpf`.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct CpfExists {
    pub exists: bool,
}

/// The logged-in client, from `GET /api/me`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Me {
    pub id: i64,
    #[serde(rename = "nome")]
    pub name: String,
    pub cpf: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(rename = "telefone", default)]
    pub phone: Option<String>,
}

/// A registered client, as listed to admins.
#[derive(Debug, Clone, Serialize, Deserialize, Tabled)]
pub struct ClientRecord {
    #[tabled(rename = "ID")]
    pub id: i64,
    #[serde(rename = "nome")]
    #[tabled(rename = "NAME")]
    pub name: String,
    #[tabled(rename = "CPF")]
    pub cpf: String,
    #[serde(default)]
    #[tabled(rename = "EMAIL", display = "display_option")]
    pub email: Option<String>,
    #[serde(rename = "telefone", default)]
    #[tabled(rename = "PHONE", display = "display_option")]
    pub phone: Option<String>,
    #[serde(default)]
    #[tabled(rename = "CEP", display = "display_option")]
    pub cep: Option<String>,
    #[serde(rename = "endereco", default)]
    #[tabled(rename = "ADDRESS", display = "display_option")]
    pub address: Option<String>,
    #[serde(rename = "observacoes", default)]
    #[tabled(rename = "NOTES", display = "display_option")]
    pub notes: Option<String>,
    #[serde(default)]
    #[tabled(rename = "LAST SMS", display = "display_option")]
    pub last_sms_sent: Option<String>,
}

/// A booked appointment, as listed to admins.
#[derive(Debug, Clone, Serialize, Deserialize, Tabled)]
pub struct AppointmentRecord {
    #[tabled(rename = "ID")]
    pub id: i64,
    #[tabled(rename = "CLIENT", display = "display_option_id")]
    pub cliente_id: Option<i64>,
    #[serde(rename = "nome")]
    #[tabled(rename = "NAME")]
    pub name: String,
    #[serde(rename = "servico", default)]
    #[tabled(rename = "SERVICE", display = "display_option")]
    pub service: Option<String>,
    #[serde(rename = "barbeiro", default)]
    #[tabled(rename = "BARBER", display = "display_option")]
    pub barber: Option<String>,
    #[serde(rename = "data", default)]
    #[tabled(rename = "DATE", display = "display_option")]
    pub date: Option<String>,
    #[serde(rename = "horario", default)]
    #[tabled(rename = "TIME", display = "display_option")]
    pub time: Option<String>,
    #[serde(default)]
    #[tabled(rename = "CREATED", display = "display_option")]
    pub criado_em: Option<String>,
}

fn display_option(opt: &Option<String>) -> String {
    opt.clone().unwrap_or_else(|| "-".to_string())
}

fn display_option_id(opt: &Option<i64>) -> String {
    opt.map(|id| id.to_string())
        .unwrap_or_else(|| "-".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_record_from_backend_json() {
        let record: ClientRecord = serde_json::from_value(serde_json::json!({
            "id": 3,
            "nome": "Maria",
            "cpf": "52998224725",
            "email": null,
            "telefone": "11987654321",
            "cep": "01310100",
            "endereco": "Avenida Paulista",
            "observacoes": null,
            "last_sms_sent": null
        }))
        .unwrap();

        assert_eq!(record.name, "Maria");
        assert_eq!(record.phone.as_deref(), Some("11987654321"));
        assert!(record.email.is_none());

        let fields: Vec<String> = Tabled::fields(&record)
            .into_iter()
            .map(|f| f.into_owned())
            .collect();
        assert_eq!(fields[0], "3");
        assert_eq!(fields[3], "-");
    }

    #[test]
    fn test_appointments_tolerate_null_columns() {
        let rows: Vec<AppointmentRecord> = serde_json::from_value(serde_json::json!([
            {
                "id": 2,
                "cliente_id": 3,
                "nome": "Maria",
                "servico": "Corte",
                "barbeiro": null,
                "data": "2026-11-03",
                "horario": null,
                "criado_em": null
            },
            {
                "id": 1,
                "cliente_id": null,
                "nome": "João",
                "servico": "Barba",
                "barbeiro": "Carlos",
                "data": "2026-11-04",
                "horario": "10:00"
            }
        ]))
        .unwrap();

        assert_eq!(rows.len(), 2);
        assert!(rows[0].barber.is_none());
        assert_eq!(rows[1].barber.as_deref(), Some("Carlos"));

        let fields: Vec<String> = Tabled::fields(&rows[0])
            .into_iter()
            .map(|f| f.into_owned())
            .collect();
        assert_eq!(fields[4], "-");
        assert_eq!(fields[6], "-");
    }

    #[test]
    fn test_ok_response_without_id() {
        let ok: OkResponse = serde_json::from_str(r#"{"ok": true}"#).unwrap();
        assert!(ok.ok);
        assert!(ok.id.is_none());
    }
}
