use diesel::deserialize::{FromSql, FromSqlRow};
use diesel::expression::AsExpression;
use diesel::serialize;
use diesel::serialize::{IsNull, Output, ToSql};
use diesel::sql_types::Text;
use diesel::sqlite::{Sqlite, SqliteValue};
use serde::{Deserialize, Serialize};

/// An ordered list of record ids stored as a JSON array in a text column
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, AsExpression, FromSqlRow)]
#[diesel(sql_type = Text)]
#[serde(transparent)]
pub struct IdList(pub Vec<String>);

impl IdList {
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.0.iter().any(|existing| existing == id)
    }

    pub fn push(&mut self, id: String) {
        self.0.push(id);
    }

    /// Removes every occurrence of `id`, returning whether anything was removed
    pub fn remove(&mut self, id: &str) -> bool {
        let before = self.0.len();
        self.0.retain(|existing| existing != id);
        self.0.len() != before
    }
}

impl FromSql<Text, Sqlite> for IdList {
    fn from_sql(value: SqliteValue<'_, '_, '_>) -> diesel::deserialize::Result<Self> {
        let text = <String as FromSql<Text, Sqlite>>::from_sql(value)?;
        let ids = serde_json::from_str(&text)?;
        Ok(IdList(ids))
    }
}

impl ToSql<Text, Sqlite> for IdList {
    fn to_sql<'b>(&'b self, out: &mut Output<'b, '_, Sqlite>) -> serialize::Result {
        out.set_value(serde_json::to_string(&self.0)?);
        Ok(IsNull::No)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_remove_reports_membership() {
        let mut ids = IdList(vec!["a".to_string(), "b".to_string()]);

        assert!(ids.remove("a"));
        assert!(!ids.remove("a"));
        assert_eq!(ids.0, vec!["b".to_string()]);
    }

    #[test]
    fn test_serializes_as_plain_array() {
        let ids = IdList(vec!["r1".to_string(), "r2".to_string()]);
        assert_eq!(serde_json::to_string(&ids).unwrap(), r#"["r1","r2"]"#);
    }
}
