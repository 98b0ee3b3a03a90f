//! Demo plan used when the server starts without a backup file.
//!
//! Mirrors the household plan the dashboard was designed around: four projects
//! across the three built-in categories and three variable incomes.

use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;

use crate::entities::config::{
    AdminConfig, CATEGORY_EDUCATION, CATEGORY_GENERATING_ASSET, CATEGORY_LIABILITY,
};
use crate::entities::income::Income;
use crate::entities::project::{Project, TrackingEntry};
use crate::store::PlanData;

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

fn datetime(year: i32, month: u32, day: u32) -> NaiveDateTime {
    date(year, month, day).and_hms_opt(0, 0, 0).unwrap()
}

/// Builds the demo plan.
pub fn demo_plan() -> PlanData {
    PlanData {
        projects: vec![
            Project {
                id: 1,
                name: "Mejeuh land title".to_string(),
                category: CATEGORY_GENERATING_ASSET.to_string(),
                total_budget: Decimal::from(2_815_000),
                monthly_allocation: Decimal::from(200_000),
                amount_used: Decimal::from(50_000),
                monthly_cash_flow: Decimal::ZERO,
                status: "In progress".to_string(),
                due_date: date(2025, 6, 30),
                expected_roi_pct: 12.0,
                priority: "High".to_string(),
                description: "Land acquisition for future rental income".to_string(),
                funding_source: "William's salary".to_string(),
                owner: "Alix".to_string(),
                created_by: "Alix".to_string(),
                updated_by: "Alix".to_string(),
                created_at: datetime(2025, 1, 15),
                updated_at: datetime(2025, 2, 10),
                monthly_tracking: vec![TrackingEntry {
                    month: "2025-01".to_string(),
                    planned: Decimal::from(200_000),
                    actual: Decimal::from(50_000),
                }],
                allocations_received: Vec::new(),
            },
            Project {
                id: 2,
                name: "Family trip to Switzerland".to_string(),
                category: CATEGORY_LIABILITY.to_string(),
                total_budget: Decimal::from(8_189_592),
                monthly_allocation: Decimal::from(680_000),
                amount_used: Decimal::ZERO,
                monthly_cash_flow: Decimal::from(-680_000),
                status: "Planned".to_string(),
                due_date: date(2025, 8, 15),
                expected_roi_pct: 0.0,
                priority: "Medium".to_string(),
                description: "Family cohesion trip".to_string(),
                funding_source: "William's salary".to_string(),
                owner: "William".to_string(),
                created_by: "William".to_string(),
                updated_by: "William".to_string(),
                created_at: datetime(2025, 1, 20),
                updated_at: datetime(2025, 1, 20),
                monthly_tracking: Vec::new(),
                allocations_received: Vec::new(),
            },
            Project {
                id: 3,
                name: "Children's schooling".to_string(),
                category: CATEGORY_EDUCATION.to_string(),
                total_budget: Decimal::from(6_500_000),
                monthly_allocation: Decimal::from(542_000),
                amount_used: Decimal::from(1_084_000),
                monthly_cash_flow: Decimal::from(-542_000),
                status: "In progress".to_string(),
                due_date: date(2025, 12, 31),
                expected_roi_pct: 25.0,
                priority: "Critical".to_string(),
                description: "Education for the three children".to_string(),
                funding_source: "Side business revenue".to_string(),
                owner: "Alix".to_string(),
                created_by: "Alix".to_string(),
                updated_by: "Alix".to_string(),
                created_at: datetime(2024, 12, 1),
                updated_at: datetime(2025, 2, 15),
                monthly_tracking: vec![
                    TrackingEntry {
                        month: "2025-01".to_string(),
                        planned: Decimal::from(542_000),
                        actual: Decimal::from(542_000),
                    },
                    TrackingEntry {
                        month: "2025-02".to_string(),
                        planned: Decimal::from(542_000),
                        actual: Decimal::from(542_000),
                    },
                ],
                allocations_received: Vec::new(),
            },
            Project {
                id: 4,
                name: "Side business".to_string(),
                category: CATEGORY_GENERATING_ASSET.to_string(),
                total_budget: Decimal::from(2_786_480),
                monthly_allocation: Decimal::from(100_000),
                amount_used: Decimal::from(150_000),
                monthly_cash_flow: Decimal::from(232_000),
                status: "In development".to_string(),
                due_date: date(2025, 3, 30),
                expected_roi_pct: 18.0,
                priority: "Critical".to_string(),
                description: "Business generating passive income".to_string(),
                funding_source: "Savings".to_string(),
                owner: "William".to_string(),
                created_by: "William".to_string(),
                updated_by: "William".to_string(),
                created_at: datetime(2024, 11, 10),
                updated_at: datetime(2025, 2, 8),
                monthly_tracking: vec![
                    TrackingEntry {
                        month: "2025-01".to_string(),
                        planned: Decimal::from(100_000),
                        actual: Decimal::from(75_000),
                    },
                    TrackingEntry {
                        month: "2025-02".to_string(),
                        planned: Decimal::from(100_000),
                        actual: Decimal::from(75_000),
                    },
                ],
                allocations_received: Vec::new(),
            },
        ],
        incomes: vec![
            Income {
                id: 1,
                name: "William's salary".to_string(),
                monthly_amount: Decimal::from(800_000),
                kind: "Salary".to_string(),
                regular: true,
                owner: "William".to_string(),
                available_from: date(2024, 12, 1),
                created_by: "William".to_string(),
                updated_by: "William".to_string(),
                created_at: datetime(2024, 12, 1),
                updated_at: datetime(2025, 1, 1),
                allocations: Vec::new(),
            },
            Income {
                id: 2,
                name: "Side business revenue".to_string(),
                monthly_amount: Decimal::from(232_000),
                kind: "Business".to_string(),
                regular: false,
                owner: "William".to_string(),
                available_from: date(2025, 1, 15),
                created_by: "William".to_string(),
                updated_by: "William".to_string(),
                created_at: datetime(2025, 1, 15),
                updated_at: datetime(2025, 2, 1),
                allocations: Vec::new(),
            },
            Income {
                id: 3,
                name: "Savings draw-down".to_string(),
                monthly_amount: Decimal::from(50_000),
                kind: "Savings".to_string(),
                regular: true,
                owner: "Alix".to_string(),
                available_from: date(2024, 12, 1),
                created_by: "Alix".to_string(),
                updated_by: "Alix".to_string(),
                created_at: datetime(2024, 12, 1),
                updated_at: datetime(2024, 12, 1),
                allocations: Vec::new(),
            },
        ],
        config: AdminConfig::default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn demo_plan_is_internally_consistent() {
        let data = demo_plan();
        assert_eq!(data.projects.len(), 4);
        assert_eq!(data.incomes.len(), 3);
        assert_eq!(data.next_project_id(), 5);
        assert_eq!(data.next_income_id(), 4);
        for project in &data.projects {
            assert!(data.config.lists.has_category(&project.category));
            assert!(data.config.lists.has_status(&project.status));
            assert!(data.config.lists.has_priority(&project.priority));
        }
        for income in &data.incomes {
            assert!(data.config.lists.has_income_kind(&income.kind));
        }
    }
}
