use crate::features::expenses::{Expense, ExpenseType};
use serde::{Deserialize, Serialize};
use std::fmt;

/// 同期処理の結果（同期処理はエラーを返さず、常にこの形で結果を報告する）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SyncResult {
    pub success: bool,
    pub message: String,
    /// 送信した収支の件数
    pub synced_count: usize,
}

impl SyncResult {
    pub fn succeeded<S: Into<String>>(message: S, synced_count: usize) -> Self {
        Self {
            success: true,
            message: message.into(),
            synced_count,
        }
    }

    pub fn failed<S: Into<String>>(message: S) -> Self {
        Self {
            success: false,
            message: message.into(),
            synced_count: 0,
        }
    }
}

/// 同期先が採番したID（文字列・数値のどちらでも受け付ける）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RemoteId {
    Text(String),
    Number(i64),
}

impl fmt::Display for RemoteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RemoteId::Text(value) => write!(f, "{value}"),
            RemoteId::Number(value) => write!(f, "{value}"),
        }
    }
}

/// 同期先コレクションの要素（IDのみ使用し、その他のフィールドは無視する）
#[derive(Debug, Clone, Deserialize)]
pub struct RemoteExpense {
    pub id: RemoteId,
}

/// 同期先に送信する収支
///
/// ローカルのIDは`localId`として送り、同期先のIDとは区別する。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SyncPayload {
    pub title: String,
    pub amount: f64,
    pub created_at: String,
    #[serde(rename = "type")]
    pub expense_type: ExpenseType,
    pub local_id: i64,
}

impl From<&Expense> for SyncPayload {
    fn from(expense: &Expense) -> Self {
        Self {
            title: expense.title.clone(),
            amount: expense.amount,
            created_at: expense.created_at.clone(),
            expense_type: expense.expense_type,
            local_id: expense.id,
        }
    }
}
