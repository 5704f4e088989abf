use crate::features::expenses::ExpenseType;
use serde::{Deserialize, Serialize};

/// 月別の集計結果
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlySummary {
    pub year: i32,
    pub month: u32,
    pub total_income: f64,
    pub total_expense: f64,
    pub balance: f64,
    pub entry_count: usize,
}

impl MonthlySummary {
    /// 空の集計を作成する
    pub fn empty(year: i32, month: u32) -> Self {
        Self {
            year,
            month,
            total_income: 0.0,
            total_expense: 0.0,
            balance: 0.0,
            entry_count: 0,
        }
    }

    /// 収支を一件加算する
    pub(crate) fn add(&mut self, amount: f64, expense_type: ExpenseType) {
        match expense_type {
            ExpenseType::Income => self.total_income += amount,
            ExpenseType::Expense => self.total_expense += amount,
        }
        self.balance = self.total_income - self.total_expense;
        self.entry_count += 1;
    }
}

/// 全期間の合計
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OverallTotals {
    pub total_income: f64,
    pub total_expense: f64,
    pub balance: f64,
    pub entry_count: usize,
}
