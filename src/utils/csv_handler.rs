//! 表单记录 CSV 导出
//!
//! 供 CLI 与 Admin API 共用。固定列在前，表单字段列按首次出现顺序追加，
//! 标注后的 `campaign`、`agent` 字段因此总在原始字段之前。

use std::io::Write;

use csv::WriterBuilder;

use crate::errors::Result;
use crate::storage::FormEntry;

/// 固定列
const FIXED_HEADERS: &[&str] = &["id", "form_id", "campaign_id", "agent_id", "created_at"];

/// 收集所有记录中的字段名，保持首次出现的顺序
fn field_columns(entries: &[FormEntry]) -> Vec<&str> {
    let mut columns: Vec<&str> = Vec::new();
    for entry in entries {
        for field in &entry.fields {
            if !columns.contains(&field.name.as_str()) {
                columns.push(field.name.as_str());
            }
        }
    }
    columns
}

/// 将表单记录写入任意 writer
pub fn write_entries_csv<W: Write>(writer: W, entries: &[FormEntry]) -> Result<()> {
    let mut wtr = WriterBuilder::new().has_headers(false).from_writer(writer);
    let columns = field_columns(entries);

    let header = FIXED_HEADERS.iter().copied().chain(columns.iter().copied());
    wtr.write_record(header)?;

    for entry in entries {
        let mut record = vec![
            entry.id.to_string(),
            entry.form_id.clone(),
            entry.campaign_id.map(|id| id.to_string()).unwrap_or_default(),
            entry.agent_id.map(|id| id.to_string()).unwrap_or_default(),
            entry.created_at.to_rfc3339(),
        ];
        // 同名字段取第一个
        for column in &columns {
            let value = entry
                .fields
                .iter()
                .find(|f| f.name == *column)
                .map(|f| f.value.clone())
                .unwrap_or_default();
            record.push(value);
        }
        wtr.write_record(&record)?;
    }

    wtr.flush()?;
    Ok(())
}

/// 导出为内存中的 CSV 字符串
pub fn entries_to_csv_string(entries: &[FormEntry]) -> Result<String> {
    let mut buf = Vec::new();
    write_entries_csv(&mut buf, entries)?;
    String::from_utf8(buf).map_err(|e| crate::errors::WalinkError::serialization(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::FormField;
    use chrono::Utc;

    fn entry(id: i64, fields: Vec<FormField>) -> FormEntry {
        FormEntry {
            id,
            form_id: "contact".to_string(),
            campaign_id: Some(12),
            agent_id: None,
            fields,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_header_keeps_field_order() {
        let entries = vec![
            entry(
                2,
                vec![
                    FormField::new("campaign", "Promo (#12)"),
                    FormField::new("email", "a@b.c"),
                ],
            ),
            entry(
                1,
                vec![
                    FormField::new("campaign", "Promo (#12)"),
                    FormField::new("agent", "Budi - 628 (#7)"),
                    FormField::new("email", "d@e.f"),
                ],
            ),
        ];

        let csv = entries_to_csv_string(&entries).unwrap();
        let mut lines = csv.lines();
        assert_eq!(
            lines.next().unwrap(),
            "id,form_id,campaign_id,agent_id,created_at,campaign,email,agent"
        );
        let first = lines.next().unwrap();
        assert!(first.starts_with("2,contact,12,,"));
        assert!(first.ends_with("Promo (#12),a@b.c,"));
    }

    #[test]
    fn test_values_are_quoted_when_needed() {
        let entries = vec![entry(1, vec![FormField::new("message", "hi, there")])];
        let csv = entries_to_csv_string(&entries).unwrap();
        assert!(csv.contains("\"hi, there\""));
    }

    #[test]
    fn test_empty_export_has_header_only() {
        let csv = entries_to_csv_string(&[]).unwrap();
        assert_eq!(csv.trim_end(), "id,form_id,campaign_id,agent_id,created_at");
    }
}
