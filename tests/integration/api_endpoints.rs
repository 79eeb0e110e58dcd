//! End-to-end tests against a running API server

use std::sync::Arc;

use inventory_stats::store::{Collection, MemoryStore};
use pretty_assertions::assert_eq;
use reqwest::StatusCode;
use serde_json::{Value, json};

use super::helpers::{
    FailingStore, create_test_host, create_test_inventory, doc, spawn_test_api, url,
};

async fn get_json(path: &str, store: MemoryStore) -> (StatusCode, Value) {
    let addr = spawn_test_api(Arc::new(store)).await;
    let response = reqwest::get(url(addr, path)).await.unwrap();
    let status = response.status();
    let body = response.json::<Value>().await.unwrap();
    (status, body)
}

fn cluster_names(body: &Value) -> Vec<String> {
    let mut names: Vec<String> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["name"].as_str().unwrap().to_string())
        .collect();
    names.sort();
    names
}

#[tokio::test]
async fn test_health_endpoint() {
    let (status, body) = get_json("/health", create_test_inventory()).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["store"]["healthy"], true);
    assert!(body["timestamp"].is_string());
}

#[tokio::test]
async fn test_health_reports_unreachable_store() {
    let addr = spawn_test_api(Arc::new(FailingStore)).await;
    let response = reqwest::get(url(addr, "/health")).await.unwrap();

    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["status"], "degraded");
    assert_eq!(body["store"]["healthy"], false);
}

#[tokio::test]
async fn test_list_hosts_returns_documents_as_stored() {
    let (status, body) = get_json("/hosts", create_test_inventory()).await;

    assert_eq!(status, StatusCode::OK);
    let hosts = body.as_array().unwrap();
    assert_eq!(hosts.len(), 4);
    assert_eq!(hosts[0]["_id"], "host-1");
    assert_eq!(hosts[0]["cpu_manufacturer"], "Intel");
    assert_eq!(hosts[0]["mem_size"], 16);
}

#[tokio::test]
async fn test_get_host_by_id() {
    let (status, body) = get_json("/hosts/host-3", create_test_inventory()).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["_id"], "host-3");
    assert_eq!(body["cpu_manufacturer"], "AMD");
}

#[tokio::test]
async fn test_get_host_by_object_id() {
    let store = MemoryStore::new().with_documents(
        Collection::Host,
        vec![doc(json!({
            "_id": {"$oid": "5f1a2b3c4d5e6f7a8b9c0d1e"},
            "cpu_manufacturer": "Intel",
        }))],
    );

    let (status, body) = get_json("/hosts/5f1a2b3c4d5e6f7a8b9c0d1e", store).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["cpu_manufacturer"], "Intel");
}

#[tokio::test]
async fn test_get_unknown_host_is_null() {
    let (status, body) = get_json("/hosts/no-such-host", create_test_inventory()).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, Value::Null);
}

#[tokio::test]
async fn test_host_statistics_counts_vendors() {
    let (status, body) = get_json("/hosts/statistics", create_test_inventory()).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({"intel_hosts": 2, "amd_hosts": 1, "ibm_hosts": 1})
    );
}

#[tokio::test]
async fn test_host_statistics_on_empty_inventory() {
    let (status, body) = get_json("/hosts/statistics", MemoryStore::new()).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({"intel_hosts": 0, "amd_hosts": 0, "ibm_hosts": 0})
    );
}

#[tokio::test]
async fn test_list_other_collections() {
    let store = create_test_inventory().with_documents(
        Collection::Vm,
        vec![doc(json!({"_id": "vm-1", "os_type": "rhel_7x64"}))],
    );
    let addr = spawn_test_api(Arc::new(store)).await;

    for (path, expected) in [
        ("/vms", 1),
        ("/clusters", 4),
        ("/datacenters", 1),
        ("/templates", 1),
        ("/statistics/setups", 2),
    ] {
        let response = reqwest::get(url(addr, path)).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK, "{path}");
        let body: Value = response.json().await.unwrap();
        assert_eq!(body.as_array().unwrap().len(), expected, "{path}");
    }
}

#[tokio::test]
async fn test_list_empty_collection_is_empty_array() {
    let (status, body) = get_json("/vms", MemoryStore::new()).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn test_clusters_without_filters_returns_all() {
    let (status, body) = get_json("/clusters", create_test_inventory()).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(cluster_names(&body), vec!["dense", "large", "small", "wide"]);
}

#[tokio::test]
async fn test_clusters_min_hosts() {
    let (_, body) = get_json("/clusters?hosts=5", create_test_inventory()).await;
    assert_eq!(cluster_names(&body), vec!["large", "wide"]);
}

#[tokio::test]
async fn test_clusters_min_vms() {
    let (_, body) = get_json("/clusters?vms=10", create_test_inventory()).await;
    assert_eq!(cluster_names(&body), vec!["dense", "large"]);
}

#[tokio::test]
async fn test_clusters_thresholds_are_inclusive_and_intersect() {
    let (_, body) = get_json("/clusters?hosts=3&vms=6", create_test_inventory()).await;
    assert_eq!(cluster_names(&body), vec!["dense", "large", "wide"]);

    let (_, body) = get_json("/clusters?hosts=5&vms=10", create_test_inventory()).await;
    assert_eq!(cluster_names(&body), vec!["large"]);
}

#[tokio::test]
async fn test_clusters_negative_threshold_keeps_all() {
    let (status, body) = get_json("/clusters?vms=-1", create_test_inventory()).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(cluster_names(&body), vec!["dense", "large", "small", "wide"]);

    let (_, body) = get_json("/clusters?hosts=-5&vms=10", create_test_inventory()).await;
    assert_eq!(cluster_names(&body), vec!["dense", "large"]);
}

#[tokio::test]
async fn test_clusters_rejects_non_integer_threshold() {
    let addr = spawn_test_api(Arc::new(create_test_inventory())).await;

    for query in ["hosts=many", "vms=2.5", "hosts=99999999999999999999"] {
        let response = reqwest::get(url(addr, &format!("/clusters?{query}")))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "{query}");
        let body: Value = response.json().await.unwrap();
        assert!(body["error"].is_string(), "{query}");
    }
}

#[tokio::test]
async fn test_general_statistics_for_hosts() {
    let (status, body) = get_json(
        "/statistics/general?stats_for=hosts",
        create_test_inventory(),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["empty"], false);
    assert_eq!(body["hosts_count"], 4);
    assert_eq!(body["average_mem_size"], 60);
    assert_eq!(body["max_mem_size"], 128);
    assert_eq!(body["average_mem_usage"], 50.0);
    assert_eq!(body["average_cpu_usage"], 25.0);
    assert_eq!(body["average_running_vms_count"], 4);
    assert_eq!(body["max_nics_count"], 2);
    assert_eq!(
        body["cpus"],
        json!({"Intel": 50.0, "AMD": 25.0, "IBM": 25.0})
    );
    assert_eq!(body["cpu_cores"], json!({"8": 100.0}));
    assert_eq!(body["os_types"], json!({"RHEL": 100.0}));
}

#[tokio::test]
async fn test_host_without_manufacturer_still_counts() {
    let store = create_test_inventory()
        .with_documents(Collection::Host, vec![create_test_host("host-5", None, 60)]);

    let (status, body) = get_json("/statistics/general?stats_for=hosts", store).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["hosts_count"], 5);
    assert_eq!(
        body["cpus"],
        json!({"Intel": 40.0, "AMD": 20.0, "IBM": 20.0})
    );
}

#[tokio::test]
async fn test_general_statistics_for_setups() {
    let (status, body) = get_json(
        "/statistics/general?stats_for=setups",
        create_test_inventory(),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({
            "empty": false,
            "setups_count": 2,
            "average_dcs_count": 2,
            "max_dcs_count": 3,
            "average_clusters_count": 4,
            "max_clusters_count": 6,
            "average_hosts_count": 12,
            "max_hosts_count": 20,
            "average_vms_count": 55,
            "max_vms_count": 100,
        })
    );
}

#[tokio::test]
async fn test_general_statistics_for_clusters() {
    let (_, body) = get_json(
        "/statistics/general?stats_for=clusters",
        create_test_inventory(),
    )
    .await;

    assert_eq!(body["clusters_count"], 4);
    assert_eq!(body["max_vms_count"], 50);
    assert_eq!(body["cpu_families"], json!({"Intel Skylake Family": 100.0}));
    assert_eq!(body["compatibility_versions"], json!({"4.2": 100.0}));
}

#[tokio::test]
async fn test_general_statistics_on_empty_collection() {
    let (status, body) = get_json(
        "/statistics/general?stats_for=vms",
        create_test_inventory(),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"vms_count": 0, "empty": true}));
}

#[tokio::test]
async fn test_general_statistics_requires_known_resource() {
    let addr = spawn_test_api(Arc::new(create_test_inventory())).await;

    for path in [
        "/statistics/general",
        "/statistics/general?stats_for=",
        "/statistics/general?stats_for=templates",
        "/statistics/general?stats_for=Hosts",
    ] {
        let response = reqwest::get(url(addr, path)).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "{path}");
        let body: Value = response.json().await.unwrap();
        assert!(body["error"].is_string(), "{path}");
    }
}

#[tokio::test]
async fn test_store_failure_is_server_error() {
    let addr = spawn_test_api(Arc::new(FailingStore)).await;

    for path in [
        "/hosts",
        "/hosts/host-1",
        "/hosts/statistics",
        "/clusters?hosts=1",
        "/statistics/general?stats_for=storage",
    ] {
        let response = reqwest::get(url(addr, path)).await.unwrap();
        assert_eq!(
            response.status(),
            StatusCode::INTERNAL_SERVER_ERROR,
            "{path}"
        );
        let body: Value = response.json().await.unwrap();
        assert!(
            body["error"].as_str().unwrap().contains("connection refused"),
            "{path}"
        );
    }
}

#[tokio::test]
async fn test_openapi_document_lists_endpoints() {
    let (status, body) = get_json("/api-docs/openapi.json", MemoryStore::new()).await;

    assert_eq!(status, StatusCode::OK);
    let paths = body["paths"].as_object().unwrap();
    for path in [
        "/health",
        "/hosts",
        "/hosts/statistics",
        "/clusters",
        "/statistics/general",
    ] {
        assert!(paths.contains_key(path), "missing {path}");
    }
}

#[tokio::test]
async fn test_cors_header_on_simple_request() {
    let addr = spawn_test_api(Arc::new(create_test_inventory())).await;

    let response = reqwest::Client::new()
        .get(url(addr, "/hosts"))
        .header("Origin", "http://dashboard.example")
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()["access-control-allow-origin"],
        "*"
    );
}
