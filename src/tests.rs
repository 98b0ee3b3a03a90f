#[cfg(test)]
mod integration_tests {
    use crate::handlers::allocations::{AllocateRequest, AllocationEntryRequest};
    use crate::handlers::incomes::CreateIncomeRequest;
    use crate::handlers::projects::CreateProjectRequest;
    use crate::handlers::tracking::TrackingRequest;
    use crate::schemas::ApiResponse;
    use crate::test_utils::test_utils::setup_test_app;
    use axum::http::StatusCode;
    use axum_test::TestServer;
    use chrono::NaiveDate;
    use rust_decimal::Decimal;

    fn sample_project_request() -> CreateProjectRequest {
        CreateProjectRequest {
            name: "Rental studio".to_string(),
            category: "Generating asset".to_string(),
            total_budget: Decimal::from(1_000_000),
            monthly_allocation: Decimal::from(100_000),
            amount_used: Some(Decimal::from(250_000)),
            monthly_cash_flow: Decimal::from(75_000),
            status: "Planned".to_string(),
            due_date: NaiveDate::from_ymd_opt(2026, 6, 30).unwrap(),
            expected_roi_pct: 10.0,
            priority: "Medium".to_string(),
            description: Some("Studio to rent out".to_string()),
            funding_source: Some("William's salary".to_string()),
            owner: "William".to_string(),
            author: None,
        }
    }

    #[tokio::test]
    async fn test_health_check() {
        let app = setup_test_app();
        let server = TestServer::new(app).unwrap();

        let response = server.get("/health").await;

        response.assert_status(StatusCode::OK);
        let body: serde_json::Value = response.json();
        assert_eq!(body["status"], "healthy");
        assert_eq!(body["projects"], 4);
        assert_eq!(body["incomes"], 3);
    }

    #[tokio::test]
    async fn test_create_project() {
        let app = setup_test_app();
        let server = TestServer::new(app).unwrap();

        let response = server
            .post("/api/v1/projects")
            .json(&sample_project_request())
            .await;

        response.assert_status(StatusCode::CREATED);
        let body: ApiResponse<serde_json::Value> = response.json();
        assert!(body.success);
        assert_eq!(body.message, "Project created successfully");

        // Demo plan holds ids 1-4, so the new project takes 5
        assert_eq!(body.data["id"], 5);
        assert_eq!(body.data["name"], "Rental studio");
        // Author defaults to the owner
        assert_eq!(body.data["created_by"], "William");
        // Derived fields are present
        assert_eq!(body.data["progress_pct"], 25.0);
        assert!(body.data["health"]["bucket"].is_string());
    }

    #[tokio::test]
    async fn test_create_project_rejects_unknown_category() {
        let app = setup_test_app();
        let server = TestServer::new(app).unwrap();

        let mut request = sample_project_request();
        request.category = "Cryptocurrency".to_string();

        let response = server.post("/api/v1/projects").json(&request).await;

        response.assert_status(StatusCode::BAD_REQUEST);
        let body: serde_json::Value = response.json();
        assert_eq!(body["success"], false);
        assert_eq!(body["code"], "unknown_list_value");
    }

    #[tokio::test]
    async fn test_create_project_rejects_negative_budget() {
        let app = setup_test_app();
        let server = TestServer::new(app).unwrap();

        let mut request = sample_project_request();
        request.total_budget = Decimal::from(-1);

        let response = server.post("/api/v1/projects").json(&request).await;

        response.assert_status(StatusCode::BAD_REQUEST);
        let body: serde_json::Value = response.json();
        assert_eq!(body["code"], "negative_budget");
    }

    #[tokio::test]
    async fn test_get_projects() {
        let app = setup_test_app();
        let server = TestServer::new(app).unwrap();

        let response = server.get("/api/v1/projects").await;

        response.assert_status(StatusCode::OK);
        let body: ApiResponse<serde_json::Value> = response.json();
        assert!(body.success);
        let projects = body.data.as_array().unwrap();
        assert_eq!(projects.len(), 4);
        assert_eq!(projects[0]["name"], "Mejeuh land title");
    }

    #[tokio::test]
    async fn test_get_project_not_found() {
        let app = setup_test_app();
        let server = TestServer::new(app).unwrap();

        let response = server.get("/api/v1/projects/999").await;

        response.assert_status(StatusCode::NOT_FOUND);
        let body: serde_json::Value = response.json();
        assert_eq!(body["success"], false);
        assert_eq!(body["code"], "not_found");
    }

    #[tokio::test]
    async fn test_project_health_is_overdue_past_due_date() {
        let app = setup_test_app();
        let server = TestServer::new(app).unwrap();

        // Project 1 is due 2025-06-30 and sits at ~1.8% progress
        let response = server
            .get("/api/v1/projects/1")
            .add_query_param("as_of", "2025-07-01")
            .await;

        response.assert_status(StatusCode::OK);
        let body: ApiResponse<serde_json::Value> = response.json();
        assert_eq!(body.data["health"]["bucket"], "overdue");
        assert_eq!(body.data["days_remaining"], -1);
    }

    #[tokio::test]
    async fn test_update_project_keeps_tracked_amount_used() {
        let app = setup_test_app();
        let server = TestServer::new(app).unwrap();

        // Project 3 carries tracking entries, so amount_used is derived and
        // the requested value must be ignored.
        let mut request = sample_project_request();
        request.name = "Children's schooling".to_string();
        request.category = "Education investment".to_string();
        request.amount_used = Some(Decimal::from(999));

        let response = server.put("/api/v1/projects/3").json(&request).await;

        response.assert_status(StatusCode::OK);
        let body: ApiResponse<serde_json::Value> = response.json();
        assert_eq!(body.data["amount_used"], "1084000");
        assert_eq!(body.data["updated_by"], "William");
    }

    #[tokio::test]
    async fn test_delete_project() {
        let app = setup_test_app();
        let server = TestServer::new(app).unwrap();

        let response = server.delete("/api/v1/projects/2").await;
        response.assert_status(StatusCode::OK);

        let response = server.get("/api/v1/projects/2").await;
        response.assert_status(StatusCode::NOT_FOUND);

        let response = server.get("/api/v1/projects").await;
        let body: ApiResponse<serde_json::Value> = response.json();
        assert_eq!(body.data.as_array().unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_tracking_upsert_rederives_amount_used() {
        let app = setup_test_app();
        let server = TestServer::new(app).unwrap();

        // Project 1 starts with one entry (2025-01 actual 50 000)
        let request = TrackingRequest {
            month: "2025-02".to_string(),
            planned: Decimal::from(200_000),
            actual: Decimal::from(180_000),
        };
        let response = server
            .put("/api/v1/projects/1/tracking")
            .json(&request)
            .await;

        response.assert_status(StatusCode::OK);
        let body: ApiResponse<serde_json::Value> = response.json();
        assert_eq!(body.data["monthly_tracking"].as_array().unwrap().len(), 2);
        assert_eq!(body.data["amount_used"], "230000");

        // Upserting the same month overwrites, it does not append
        let request = TrackingRequest {
            month: "2025-02".to_string(),
            planned: Decimal::from(200_000),
            actual: Decimal::from(150_000),
        };
        let response = server
            .put("/api/v1/projects/1/tracking")
            .json(&request)
            .await;

        response.assert_status(StatusCode::OK);
        let body: ApiResponse<serde_json::Value> = response.json();
        assert_eq!(body.data["monthly_tracking"].as_array().unwrap().len(), 2);
        assert_eq!(body.data["amount_used"], "200000");
    }

    #[tokio::test]
    async fn test_tracking_rejects_malformed_month_key() {
        let app = setup_test_app();
        let server = TestServer::new(app).unwrap();

        let request = TrackingRequest {
            month: "February 2025".to_string(),
            planned: Decimal::from(1),
            actual: Decimal::from(1),
        };
        let response = server
            .put("/api/v1/projects/1/tracking")
            .json(&request)
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
        let body: serde_json::Value = response.json();
        assert_eq!(body["code"], "invalid_month_key");
    }

    #[tokio::test]
    async fn test_create_income() {
        let app = setup_test_app();
        let server = TestServer::new(app).unwrap();

        let request = CreateIncomeRequest {
            name: "Apartment rent".to_string(),
            monthly_amount: Decimal::from(150_000),
            kind: "Rent".to_string(),
            regular: true,
            owner: "Alix".to_string(),
            available_from: NaiveDate::from_ymd_opt(2025, 3, 1).unwrap(),
            author: None,
        };
        let response = server.post("/api/v1/incomes").json(&request).await;

        response.assert_status(StatusCode::CREATED);
        let body: ApiResponse<serde_json::Value> = response.json();
        assert_eq!(body.data["id"], 4);
        assert_eq!(body.data["allocated_total"], "0");
        assert_eq!(body.data["unallocated"], "150000");
    }

    #[tokio::test]
    async fn test_create_income_rejects_unknown_kind() {
        let app = setup_test_app();
        let server = TestServer::new(app).unwrap();

        let request = CreateIncomeRequest {
            name: "Lottery".to_string(),
            monthly_amount: Decimal::from(1),
            kind: "Windfall".to_string(),
            regular: false,
            owner: "Alix".to_string(),
            available_from: NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
            author: None,
        };
        let response = server.post("/api/v1/incomes").json(&request).await;

        response.assert_status(StatusCode::BAD_REQUEST);
        let body: serde_json::Value = response.json();
        assert_eq!(body["code"], "unknown_list_value");
    }

    #[tokio::test]
    async fn test_allocation_updates_both_sides() {
        let app = setup_test_app();
        let server = TestServer::new(app).unwrap();

        let request = AllocateRequest {
            entries: vec![
                AllocationEntryRequest {
                    project_id: 1,
                    amount: Decimal::from(500_000),
                    month: "2025-03".to_string(),
                },
                AllocationEntryRequest {
                    project_id: 3,
                    amount: Decimal::from(300_000),
                    month: "2025-03".to_string(),
                },
            ],
        };
        let response = server
            .put("/api/v1/incomes/1/allocations")
            .json(&request)
            .await;

        response.assert_status(StatusCode::OK);
        let body: ApiResponse<serde_json::Value> = response.json();
        assert!(body.success);
        assert_eq!(body.message, "Allocation applied successfully");
        assert_eq!(body.data["applied"], 2);

        // Income side carries the split
        let response = server.get("/api/v1/incomes/1").await;
        let body: ApiResponse<serde_json::Value> = response.json();
        assert_eq!(body.data["allocated_total"], "800000");
        assert_eq!(body.data["unallocated"], "0");

        // Project side mirrors it with the income name resolved
        let response = server.get("/api/v1/projects/1/allocations").await;
        let body: ApiResponse<serde_json::Value> = response.json();
        let records = body.data.as_array().unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0]["income_name"], "William's salary");
        assert_eq!(records[0]["amount"], "500000");
    }

    #[tokio::test]
    async fn test_allocation_replaces_previous_split() {
        let app = setup_test_app();
        let server = TestServer::new(app).unwrap();

        let first = AllocateRequest {
            entries: vec![AllocationEntryRequest {
                project_id: 1,
                amount: Decimal::from(400_000),
                month: "2025-03".to_string(),
            }],
        };
        server
            .put("/api/v1/incomes/1/allocations")
            .json(&first)
            .await
            .assert_status(StatusCode::OK);

        let second = AllocateRequest {
            entries: vec![AllocationEntryRequest {
                project_id: 2,
                amount: Decimal::from(100_000),
                month: "2025-04".to_string(),
            }],
        };
        server
            .put("/api/v1/incomes/1/allocations")
            .json(&second)
            .await
            .assert_status(StatusCode::OK);

        let response = server.get("/api/v1/incomes/1").await;
        let body: ApiResponse<serde_json::Value> = response.json();
        assert_eq!(body.data["allocations"].as_array().unwrap().len(), 1);
        assert_eq!(body.data["allocated_total"], "100000");
    }

    #[tokio::test]
    async fn test_allocation_rejects_overcommitment() {
        let app = setup_test_app();
        let server = TestServer::new(app).unwrap();

        // Income 3 pays 50 000 a month
        let request = AllocateRequest {
            entries: vec![AllocationEntryRequest {
                project_id: 1,
                amount: Decimal::from(60_000),
                month: "2025-03".to_string(),
            }],
        };
        let response = server
            .put("/api/v1/incomes/3/allocations")
            .json(&request)
            .await;

        response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
        let body: serde_json::Value = response.json();
        assert_eq!(body["code"], "over_allocation");
        let message = body["error"].as_str().unwrap();
        assert!(message.contains("60 000 FCFA"));
        assert!(message.contains("50 000 FCFA"));

        // Rejected split leaves both sides untouched
        let response = server.get("/api/v1/incomes/3").await;
        let body: ApiResponse<serde_json::Value> = response.json();
        assert_eq!(body.data["allocated_total"], "0");
        let response = server.get("/api/v1/projects/1/allocations").await;
        let body: ApiResponse<serde_json::Value> = response.json();
        assert_eq!(body.data.as_array().unwrap().len(), 0);
    }

    #[tokio::test]
    async fn test_income_edit_cannot_shrink_below_allocated_total() {
        let app = setup_test_app();
        let server = TestServer::new(app).unwrap();

        // Commit the whole 800 000 of income 1 to a project
        let request = AllocateRequest {
            entries: vec![AllocationEntryRequest {
                project_id: 1,
                amount: Decimal::from(800_000),
                month: "2025-03".to_string(),
            }],
        };
        server
            .put("/api/v1/incomes/1/allocations")
            .json(&request)
            .await
            .assert_status(StatusCode::OK);

        // Lowering the monthly amount below the committed split must fail
        let edit = CreateIncomeRequest {
            name: "William's salary".to_string(),
            monthly_amount: Decimal::from(100_000),
            kind: "Salary".to_string(),
            regular: true,
            owner: "William".to_string(),
            available_from: NaiveDate::from_ymd_opt(2024, 12, 1).unwrap(),
            author: None,
        };
        let response = server.put("/api/v1/incomes/1").json(&edit).await;

        response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
        let body: serde_json::Value = response.json();
        assert_eq!(body["code"], "over_allocation");

        // The rejected edit leaves the income untouched
        let response = server.get("/api/v1/incomes/1").await;
        let body: ApiResponse<serde_json::Value> = response.json();
        assert_eq!(body.data["monthly_amount"], "800000");
        assert_eq!(body.data["allocated_total"], "800000");
    }

    #[tokio::test]
    async fn test_allocation_unknown_income() {
        let app = setup_test_app();
        let server = TestServer::new(app).unwrap();

        let request = AllocateRequest { entries: vec![] };
        let response = server
            .put("/api/v1/incomes/999/allocations")
            .json(&request)
            .await;

        response.assert_status(StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_allocation_survives_income_deletion() {
        let app = setup_test_app();
        let server = TestServer::new(app).unwrap();

        let request = AllocateRequest {
            entries: vec![AllocationEntryRequest {
                project_id: 1,
                amount: Decimal::from(50_000),
                month: "2025-03".to_string(),
            }],
        };
        server
            .put("/api/v1/incomes/3/allocations")
            .json(&request)
            .await
            .assert_status(StatusCode::OK);

        server
            .delete("/api/v1/incomes/3")
            .await
            .assert_status(StatusCode::OK);

        // The project keeps the record, name resolved from the snapshot
        let response = server.get("/api/v1/projects/1/allocations").await;
        response.assert_status(StatusCode::OK);
        let body: ApiResponse<serde_json::Value> = response.json();
        let records = body.data.as_array().unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0]["income_name"], "Savings draw-down (deleted)");
    }

    #[tokio::test]
    async fn test_kpis_for_demo_plan() {
        let app = setup_test_app();
        let server = TestServer::new(app).unwrap();

        let response = server.get("/api/v1/kpis").await;

        response.assert_status(StatusCode::OK);
        let body: ApiResponse<serde_json::Value> = response.json();
        assert_eq!(body.data["total_monthly_income"], "1082000");
        assert_eq!(body.data["monthly_cash_flow"], "-990000");
        assert_eq!(body.data["total_generating_assets"], "5601480");
        assert_eq!(body.data["generating_asset_count"], 2);
        assert_eq!(body.data["phase"], "Stabilization");
    }

    #[tokio::test]
    async fn test_kpis_reflect_mutations() {
        let app = setup_test_app();
        let server = TestServer::new(app).unwrap();

        // Prime the cache
        server.get("/api/v1/kpis").await.assert_status(StatusCode::OK);

        // Deleting the Switzerland trip removes its -680 000 cash flow
        server
            .delete("/api/v1/projects/2")
            .await
            .assert_status(StatusCode::OK);

        let response = server.get("/api/v1/kpis").await;
        let body: ApiResponse<serde_json::Value> = response.json();
        assert_eq!(body.data["monthly_cash_flow"], "-310000");
        assert_eq!(body.data["total_liabilities"], "0");
    }

    #[tokio::test]
    async fn test_kpis_period_filter() {
        let app = setup_test_app();
        let server = TestServer::new(app).unwrap();

        // Only projects and incomes whose span starts in 2024: projects 3
        // and 4, incomes 1 and 3
        let response = server
            .get("/api/v1/kpis")
            .add_query_param("year", "2024")
            .add_query_param("as_of", "2025-03-01")
            .await;

        response.assert_status(StatusCode::OK);
        let body: ApiResponse<serde_json::Value> = response.json();
        assert_eq!(body.data["total_monthly_income"], "850000");
        assert_eq!(body.data["total_education"], "6500000");
        assert_eq!(body.data["total_liabilities"], "0");
    }

    #[tokio::test]
    async fn test_get_config() {
        let app = setup_test_app();
        let server = TestServer::new(app).unwrap();

        let response = server.get("/api/v1/config").await;

        response.assert_status(StatusCode::OK);
        let body: ApiResponse<serde_json::Value> = response.json();
        let categories = body.data["lists"]["project_categories"].as_array().unwrap();
        assert_eq!(categories.len(), 3);
        assert!(body.data["mentor_advice"]["Kiyosaki"].is_object());
    }

    #[tokio::test]
    async fn test_update_config() {
        let app = setup_test_app();
        let server = TestServer::new(app).unwrap();

        let response = server.get("/api/v1/config").await;
        let mut body: ApiResponse<serde_json::Value> = response.json();
        body.data["kpi_targets"]["cash_flow_target"] = serde_json::json!("750000");

        let response = server.put("/api/v1/config").json(&body.data).await;
        response.assert_status(StatusCode::OK);

        let response = server.get("/api/v1/config").await;
        let body: ApiResponse<serde_json::Value> = response.json();
        assert_eq!(body.data["kpi_targets"]["cash_flow_target"], "750000");
    }

    #[tokio::test]
    async fn test_update_config_rejects_empty_list() {
        let app = setup_test_app();
        let server = TestServer::new(app).unwrap();

        let response = server.get("/api/v1/config").await;
        let mut body: ApiResponse<serde_json::Value> = response.json();
        body.data["lists"]["priorities"] = serde_json::json!([]);

        let response = server.put("/api/v1/config").json(&body.data).await;

        response.assert_status(StatusCode::BAD_REQUEST);
        let error: serde_json::Value = response.json();
        assert_eq!(error["code"], "empty_list");
    }

    #[tokio::test]
    async fn test_backup_roundtrip() {
        let app = setup_test_app();
        let server = TestServer::new(app).unwrap();

        let export = server.get("/api/v1/backup").await;
        export.assert_status(StatusCode::OK);
        let document: serde_json::Value = export.json();
        assert_eq!(document["projects"].as_array().unwrap().len(), 4);

        // Mutate the plan, then restore the snapshot
        server
            .delete("/api/v1/projects/1")
            .await
            .assert_status(StatusCode::OK);
        server
            .delete("/api/v1/incomes/1")
            .await
            .assert_status(StatusCode::OK);

        let response = server.post("/api/v1/backup").json(&document).await;
        response.assert_status(StatusCode::OK);
        let body: ApiResponse<serde_json::Value> = response.json();
        assert_eq!(body.data["projects"], 4);
        assert_eq!(body.data["incomes"], 3);

        let restored = server.get("/api/v1/backup").await;
        let restored_document: serde_json::Value = restored.json();
        assert_eq!(restored_document, document);
    }

    #[tokio::test]
    async fn test_backup_import_partial_document() {
        let app = setup_test_app();
        let server = TestServer::new(app).unwrap();

        // A document with only projects leaves incomes and config alone
        let document = serde_json::json!({ "projects": [] });
        let response = server.post("/api/v1/backup").json(&document).await;

        response.assert_status(StatusCode::OK);
        let body: ApiResponse<serde_json::Value> = response.json();
        assert_eq!(body.data["projects"], 0);
        assert!(body.data["incomes"].is_null());
        assert_eq!(body.data["config_replaced"], false);

        let response = server.get("/api/v1/incomes").await;
        let body: ApiResponse<serde_json::Value> = response.json();
        assert_eq!(body.data.as_array().unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_project_advice() {
        let app = setup_test_app();
        let server = TestServer::new(app).unwrap();

        let response = server.get("/api/v1/projects/1/advice").await;

        response.assert_status(StatusCode::OK);
        let body: ApiResponse<serde_json::Value> = response.json();
        assert_eq!(body.data["category"], "Generating asset");
        let advice = body.data["advice"].as_array().unwrap();
        assert_eq!(advice.len(), 3);
        let mentors: Vec<&str> = advice
            .iter()
            .map(|a| a["mentor"].as_str().unwrap())
            .collect();
        assert_eq!(mentors, vec!["Buffett", "Kiyosaki", "Ramsey"]);
    }

    #[tokio::test]
    async fn test_csv_exports() {
        let app = setup_test_app();
        let server = TestServer::new(app).unwrap();

        let response = server.get("/api/v1/export/projects.csv").await;
        response.assert_status(StatusCode::OK);
        let text = response.text();
        assert!(text.starts_with("id,name,category"));
        assert!(text.contains("Mejeuh land title"));

        let response = server.get("/api/v1/export/tracking.csv").await;
        response.assert_status(StatusCode::OK);
        let text = response.text();
        assert!(text.starts_with("project_id,project_name,month,planned,actual,variance"));
        // Project 4 tracked 75 000 against a 100 000 plan
        assert!(text.contains("-25000"));

        let response = server.get("/api/v1/export/kpis.csv").await;
        response.assert_status(StatusCode::OK);
        let text = response.text();
        assert!(text.contains("monthly_cash_flow,-990000"));
        assert!(text.contains("phase,Stabilization"));
    }
}
