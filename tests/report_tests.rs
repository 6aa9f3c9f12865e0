//! Integration tests for the daily report API.
//!
//! Covers the aggregate round trip, full-replace updates, ownership rules,
//! cascade deletion and transactional rollback.

mod common;

use axum::http::StatusCode;
use sea_orm::{ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter};
use serde_json::{Value, json};
use shiftdesk::entities::{
    daily_reports, prelude::*, report_event_titles, report_events_part3, report_events_part4,
    report_shift_managers,
};

use common::{TestApp, spawn_app};

fn report_body(date: &str, managers: &[i32], titles: &[i32]) -> Value {
    json!({
        "report_date": date,
        "shift_manager_ids": managers,
        "event_title_ids": titles,
        "health_power_sources": true,
        "health_humidity_temp": false,
        "health_fire_system": true,
        "events_part3": [],
        "events_part4": [],
    })
}

async fn child_row_count(test: &TestApp, report_id: i32) -> u64 {
    let conn = &test.store.conn;
    let managers = ReportShiftManagers::find()
        .filter(report_shift_managers::Column::ReportId.eq(report_id))
        .count(conn)
        .await
        .unwrap();
    let titles = ReportEventTitles::find()
        .filter(report_event_titles::Column::ReportId.eq(report_id))
        .count(conn)
        .await
        .unwrap();
    let part3 = ReportEventsPart3::find()
        .filter(report_events_part3::Column::ReportId.eq(report_id))
        .count(conn)
        .await
        .unwrap();
    let part4 = ReportEventsPart4::find()
        .filter(report_events_part4::Column::ReportId.eq(report_id))
        .count(conn)
        .await
        .unwrap();
    managers + titles + part3 + part4
}

#[tokio::test]
async fn test_requires_session() {
    let test = spawn_app("reports-auth").await;

    let (status, body) = test.send("GET", "/api/reports", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["success"], false);

    let (status, _) = test
        .send(
            "POST",
            "/api/reports",
            None,
            Some(report_body("2025-03-01", &[], &[])),
        )
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_create_and_fetch_aggregate() {
    let test = spawn_app("reports-roundtrip").await;
    let admin = test.login_admin().await;
    let (operator_id, operator) = test.operator(&admin, "night").await;

    let shift_id = test
        .create_shift_hours(&admin, "Night", "22:00", "06:00")
        .await;
    let outage = test.create_event_title(&admin, "Outage").await;
    let alarm = test.create_event_title(&admin, "Alarm").await;

    let mut body = report_body("2025-03-01", &[operator_id, 1, operator_id], &[outage, alarm]);
    body["shift_hours_id"] = json!(shift_id);
    body["events_part3"] = json!([{
        "event_summary": "Core switch reboot",
        "trigger_info": "Watchdog",
        "start_time": "8:30",
        "end_time": "",
        "rca_number": "RCA-17",
    }]);
    body["events_part4"] = json!([
        { "event_summary": "Door alarm", "trigger_info": "Sensor", "start_time": "01:05", "end_time": "01:20" },
        { "event_summary": "Fan noise", "trigger_info": "Walkthrough", "start_time": "", "end_time": "" },
    ]);

    let id = test.create_report(&operator, body).await;

    let (status, report) = test
        .send("GET", &format!("/api/reports/{id}"), Some(&operator), None)
        .await;
    assert_eq!(status, StatusCode::OK);

    assert_eq!(report["id"], id);
    assert_eq!(report["report_date"], "2025-03-01");
    assert_eq!(report["shift_hours"]["id"], shift_id);
    assert_eq!(report["shift_hours"]["name"], "Night");
    assert_eq!(report["health_power_sources"], true);
    assert_eq!(report["health_humidity_temp"], false);
    assert_eq!(report["health_fire_system"], true);
    assert_eq!(report["created_by"]["id"], operator_id);
    assert_eq!(report["created_by"]["username"], "night");
    assert!(report["created_by"].get("password_hash").is_none());

    let managers = report["shift_managers"].as_array().unwrap();
    assert_eq!(managers.len(), 2, "duplicate manager ids collapse");

    let titles: Vec<&str> = report["event_titles"]
        .as_array()
        .unwrap()
        .iter()
        .map(|t| t["title"].as_str().unwrap())
        .collect();
    assert_eq!(titles, vec!["Alarm", "Outage"]);

    let part3 = report["events_part3"].as_array().unwrap();
    assert_eq!(part3.len(), 1);
    assert_eq!(part3[0]["start_time"], "08:30");
    assert_eq!(part3[0]["end_time"], "");
    assert_eq!(part3[0]["rca_number"], "RCA-17");

    let part4 = report["events_part4"].as_array().unwrap();
    assert_eq!(part4.len(), 2);
    assert_eq!(part4[0]["event_summary"], "Door alarm");
    assert_eq!(part4[0]["end_time"], "01:20");
    assert_eq!(part4[1]["start_time"], "");

    let stored = ReportEventsPart3::find()
        .filter(report_events_part3::Column::ReportId.eq(id))
        .one(&test.store.conn)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(stored.start_time.as_deref(), Some("1970-01-01 08:30:00"));
    assert_eq!(stored.end_time, None);
}

#[tokio::test]
async fn test_update_replaces_children() {
    let test = spawn_app("reports-replace").await;
    let admin = test.login_admin().await;
    let (first_id, operator) = test.operator(&admin, "day").await;
    let (second_id, _) = test.operator(&admin, "swing").await;
    let title = test.create_event_title(&admin, "Maintenance").await;

    let mut body = report_body("2025-03-01", &[first_id], &[title]);
    body["events_part4"] = json!([{ "event_summary": "old", "start_time": "02:00" }]);
    let id = test.create_report(&operator, body).await;

    let (_, before) = test
        .send("GET", &format!("/api/reports/{id}"), Some(&operator), None)
        .await;

    let mut replacement = report_body("2025-03-02", &[second_id], &[]);
    replacement["health_power_sources"] = json!(false);
    let (status, body) = test
        .send(
            "PUT",
            &format!("/api/reports/{id}"),
            Some(&operator),
            Some(replacement),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["message"].is_string());

    let (_, after) = test
        .send("GET", &format!("/api/reports/{id}"), Some(&operator), None)
        .await;

    assert_eq!(after["report_date"], "2025-03-02");
    assert_eq!(after["health_power_sources"], false);
    let managers = after["shift_managers"].as_array().unwrap();
    assert_eq!(managers.len(), 1);
    assert_eq!(managers[0]["id"], second_id);
    assert!(after["event_titles"].as_array().unwrap().is_empty());
    assert!(after["events_part4"].as_array().unwrap().is_empty());

    assert_eq!(after["created_by"], before["created_by"]);
    assert_eq!(after["created_at"], before["created_at"]);
}

#[tokio::test]
async fn test_only_owner_or_admin_may_modify() {
    let test = spawn_app("reports-owner").await;
    let admin = test.login_admin().await;
    let (owner_id, owner) = test.operator(&admin, "owner").await;
    let (other_id, other) = test.operator(&admin, "other").await;
    let title = test.create_event_title(&admin, "Generator test").await;
    let shift = test
        .create_shift_hours(&admin, "Morning", "06:00", "14:00")
        .await;

    let mut body = report_body("2025-03-01", &[owner_id], &[title]);
    body["shift_hours_id"] = json!(shift);
    body["events_part3"] = json!([{ "event_summary": "Load test", "start_time": "06:30", "rca_number": "R9" }]);
    body["events_part4"] = json!([{ "event_summary": "Fuel check", "end_time": "07:15" }]);
    let id = test.create_report(&owner, body).await;
    let uri = format!("/api/reports/{id}");

    let (_, before) = test.send("GET", &uri, Some(&owner), None).await;
    let before_children = child_row_count(&test, id).await;
    assert_eq!(before_children, 4);

    let mut hijack = report_body("2030-01-01", &[other_id], &[]);
    hijack["health_fire_system"] = json!(false);
    let (status, body) = test
        .send("PUT", &uri, Some(&other), Some(hijack))
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["success"], false);

    let (_, unchanged) = test.send("GET", &uri, Some(&owner), None).await;
    assert_eq!(unchanged, before);
    assert_eq!(child_row_count(&test, id).await, before_children);

    let (status, _) = test.send("DELETE", &uri, Some(&other), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (_, still_there) = test.send("GET", &uri, Some(&owner), None).await;
    assert_eq!(still_there, before);

    let (status, _) = test
        .send(
            "PUT",
            &uri,
            Some(&admin),
            Some(report_body("2025-04-01", &[], &[])),
        )
        .await;
    assert_eq!(status, StatusCode::OK);

    let (_, updated) = test.send("GET", &uri, Some(&owner), None).await;
    assert_eq!(updated["report_date"], "2025-04-01");
}

#[tokio::test]
async fn test_delete_removes_every_child_row() {
    let test = spawn_app("reports-delete").await;
    let admin = test.login_admin().await;
    let (operator_id, operator) = test.operator(&admin, "closer").await;
    let title = test.create_event_title(&admin, "Fire drill").await;

    let mut body = report_body("2025-03-01", &[operator_id], &[title]);
    body["events_part3"] = json!([{ "event_summary": "a", "start_time": "03:00", "rca_number": "R1" }]);
    body["events_part4"] = json!([{ "event_summary": "b", "end_time": "04:00" }]);
    let id = test.create_report(&operator, body).await;
    assert_eq!(child_row_count(&test, id).await, 4);

    let uri = format!("/api/reports/{id}");
    let (status, _) = test.send("DELETE", &uri, Some(&operator), None).await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = test.send("GET", &uri, Some(&operator), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["success"], false);
    assert_eq!(child_row_count(&test, id).await, 0);

    let (status, _) = test.send("DELETE", &uri, Some(&operator), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_failed_write_rolls_back() {
    let test = spawn_app("reports-rollback").await;
    let admin = test.login_admin().await;

    let mut body = report_body("2025-03-01", &[1], &[9999]);
    body["events_part4"] = json!([{ "event_summary": "never stored" }]);

    let (status, response) = test
        .send("POST", "/api/reports", Some(&admin), Some(body))
        .await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(
        !response["error"].as_str().unwrap().contains("FOREIGN KEY"),
        "raw storage errors stay in the logs"
    );

    let reports = DailyReports::find().count(&test.store.conn).await.unwrap();
    assert_eq!(reports, 0);
    let managers = ReportShiftManagers::find()
        .count(&test.store.conn)
        .await
        .unwrap();
    assert_eq!(managers, 0);

    let id = test
        .create_report(&admin, report_body("2025-03-01", &[1], &[]))
        .await;
    let (status, _) = test
        .send(
            "PUT",
            &format!("/api/reports/{id}"),
            Some(&admin),
            Some(report_body("2025-05-05", &[], &[4242])),
        )
        .await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);

    let (_, kept) = test
        .send("GET", &format!("/api/reports/{id}"), Some(&admin), None)
        .await;
    assert_eq!(kept["report_date"], "2025-03-01");
    assert_eq!(kept["shift_managers"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_full_timestamps_pass_through() {
    let test = spawn_app("reports-timestamps").await;
    let admin = test.login_admin().await;

    let mut body = report_body("2025-03-01", &[], &[]);
    body["events_part4"] = json!([
        { "event_summary": "iso", "start_time": "2025-03-01T08:30:00", "end_time": "1970-01-01 09:45:00.000" },
        { "event_summary": "offset", "start_time": "2025-03-01T22:10:00Z" },
    ]);
    let id = test.create_report(&admin, body).await;

    let (status, report) = test
        .send("GET", &format!("/api/reports/{id}"), Some(&admin), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    let part4 = report["events_part4"].as_array().unwrap();
    assert_eq!(part4[0]["start_time"], "08:30");
    assert_eq!(part4[0]["end_time"], "09:45");
    assert_eq!(part4[1]["start_time"], "22:10");

    let stored = ReportEventsPart4::find()
        .filter(report_events_part4::Column::ReportId.eq(id))
        .all(&test.store.conn)
        .await
        .unwrap();
    assert_eq!(stored[0].start_time.as_deref(), Some("2025-03-01T08:30:00"));
    assert_eq!(stored[0].end_time.as_deref(), Some("1970-01-01 09:45:00.000"));
}

#[tokio::test]
async fn test_non_numeric_ids_get_json_errors() {
    let test = spawn_app("reports-path-ids").await;
    let admin = test.login_admin().await;

    for (method, uri) in [
        ("GET", "/api/reports/abc"),
        ("DELETE", "/api/reports/abc"),
        ("DELETE", "/api/event-titles/abc"),
        ("DELETE", "/api/shift-hours/abc"),
        ("DELETE", "/api/users/abc"),
    ] {
        let (status, body) = test.send(method, uri, Some(&admin), None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{method} {uri}");
        assert_eq!(body["success"], false, "{method} {uri}");
        assert!(body["error"].is_string(), "{method} {uri}");
    }
}

#[tokio::test]
async fn test_rejects_invalid_payloads() {
    let test = spawn_app("reports-validation").await;
    let admin = test.login_admin().await;

    let (status, _) = test
        .send(
            "POST",
            "/api/reports",
            Some(&admin),
            Some(report_body("01/03/2025", &[], &[])),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let mut body = report_body("2025-03-01", &[], &[]);
    body["events_part3"] = json!([{ "event_summary": "x", "start_time": "half past eight" }]);
    let (status, response) = test
        .send("POST", "/api/reports", Some(&admin), Some(body))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(response["error"].as_str().unwrap().contains("half past eight"));

    let (status, _) = test
        .send(
            "POST",
            "/api/reports",
            Some(&admin),
            Some(json!({ "report_date": "2025-03-01", "shift_manager_ids": "nope" })),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = test
        .send("GET", "/api/reports?date=yesterday", Some(&admin), None)
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = test
        .send(
            "PUT",
            "/api/reports/4711",
            Some(&admin),
            Some(report_body("2025-03-01", &[], &[])),
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let count = DailyReports::find().count(&test.store.conn).await.unwrap();
    assert_eq!(count, 0);
}

#[tokio::test]
async fn test_list_orders_newest_first_and_filters_by_date() {
    let test = spawn_app("reports-list").await;
    let admin = test.login_admin().await;

    let early = test
        .create_report(&admin, report_body("2025-03-01", &[], &[]))
        .await;
    let latest = test
        .create_report(&admin, report_body("2025-03-02", &[], &[]))
        .await;
    let early_second = test
        .create_report(&admin, report_body("2025-03-01", &[], &[]))
        .await;

    let (status, all) = test.send("GET", "/api/reports", Some(&admin), None).await;
    assert_eq!(status, StatusCode::OK);
    let ids: Vec<i64> = all
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["id"].as_i64().unwrap())
        .collect();
    assert_eq!(
        ids,
        vec![i64::from(latest), i64::from(early_second), i64::from(early)]
    );

    let (status, filtered) = test
        .send("GET", "/api/reports?date=2025-03-01", Some(&admin), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    let filtered = filtered.as_array().unwrap();
    assert_eq!(filtered.len(), 2);
    assert!(filtered.iter().all(|r| r["report_date"] == "2025-03-01"));

    let (_, none) = test
        .send("GET", "/api/reports?date=1999-01-01", Some(&admin), None)
        .await;
    assert!(none.as_array().unwrap().is_empty());

    let stored = DailyReports::find()
        .filter(daily_reports::Column::ReportDate.eq("2025-03-02"))
        .count(&test.store.conn)
        .await
        .unwrap();
    assert_eq!(stored, 1);
}
