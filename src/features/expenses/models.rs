use rusqlite::types::{FromSql, FromSqlError, FromSqlResult, ToSql, ToSqlOutput, ValueRef};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// 収支の種別（収入・支出）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExpenseType {
    /// 収入
    Income,
    /// 支出
    Expense,
}

impl ExpenseType {
    /// データベース・API上の文字列表現
    pub fn as_str(&self) -> &'static str {
        match self {
            ExpenseType::Income => "income",
            ExpenseType::Expense => "expense",
        }
    }
}

impl fmt::Display for ExpenseType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ExpenseType {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "income" => Ok(ExpenseType::Income),
            "expense" => Ok(ExpenseType::Expense),
            other => Err(format!("不明な収支種別です: {other}")),
        }
    }
}

impl ToSql for ExpenseType {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::from(self.as_str()))
    }
}

impl FromSql for ExpenseType {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        let text = value.as_str()?;
        text.parse()
            .map_err(|e: String| FromSqlError::Other(e.into()))
    }
}

/// 削除状態（一覧・検索は必ずどちらか一方で絞り込む）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryState {
    /// 有効（isDeleted = 0）
    Active,
    /// ゴミ箱（isDeleted = 1）
    Trashed,
}

impl EntryState {
    /// isDeletedカラムの値
    pub fn is_deleted_flag(&self) -> i64 {
        match self {
            EntryState::Active => 0,
            EntryState::Trashed => 1,
        }
    }
}

/// 収支データモデル
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Expense {
    pub id: i64,
    pub title: String,
    pub amount: f64,
    /// 作成日（日/月/年の表示用文字列）。作成後は変更されない
    pub created_at: String,
    #[serde(rename = "type")]
    pub expense_type: ExpenseType,
    pub is_deleted: bool,
}

/// 収支作成用DTO
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateExpenseDto {
    pub title: String,
    pub amount: f64,
    #[serde(rename = "type")]
    pub expense_type: ExpenseType,
}

/// 収支更新用DTO（タイトル・金額・種別をすべて上書きする）
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateExpenseDto {
    pub title: String,
    pub amount: f64,
    #[serde(rename = "type")]
    pub expense_type: ExpenseType,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expense_type_parse() {
        assert_eq!("income".parse::<ExpenseType>(), Ok(ExpenseType::Income));
        assert_eq!("expense".parse::<ExpenseType>(), Ok(ExpenseType::Expense));
        assert!("Income".parse::<ExpenseType>().is_err());
        assert!("transfer".parse::<ExpenseType>().is_err());
    }

    #[test]
    fn test_expense_serialization_uses_wire_names() {
        let expense = Expense {
            id: 3,
            title: "昼食".to_string(),
            amount: 50000.0,
            created_at: "15/10/2026".to_string(),
            expense_type: ExpenseType::Expense,
            is_deleted: false,
        };

        let json = serde_json::to_value(&expense).unwrap();
        assert_eq!(json["createdAt"], "15/10/2026");
        assert_eq!(json["type"], "expense");
        assert_eq!(json["isDeleted"], false);
    }

    #[test]
    fn test_create_dto_rejects_unknown_type() {
        // 不正な種別を含むDTOはデシリアライズできないことを確認
        let result: Result<CreateExpenseDto, _> =
            serde_json::from_str(r#"{"title":"給料","amount":1000,"type":"salary"}"#);
        assert!(result.is_err());

        let dto: CreateExpenseDto =
            serde_json::from_str(r#"{"title":"給料","amount":1000,"type":"income"}"#).unwrap();
        assert_eq!(dto.expense_type, ExpenseType::Income);
    }

    #[test]
    fn test_entry_state() {
        assert_eq!(EntryState::Active.is_deleted_flag(), 0);
        assert_eq!(EntryState::Trashed.is_deleted_flag(), 1);
    }
}
