//! Whole load runs against a mock agent

use crate::common::{agent_config, credential, read_lines, run_config, write_credentials};
use cred_loadgen::core::bad_records::bad_record_path;
use cred_loadgen::core::checkpoint::checkpoint_path;
use cred_loadgen::{AgentClient, LoadRunner, SubmitMode, compute_ranges, split_all};
use serde_json::{Value, json};
use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, Request, Respond, ResponseTemplate};

/// Accepts every record of an array body
struct AcceptAll;

impl Respond for AcceptAll {
    fn respond(&self, request: &Request) -> ResponseTemplate {
        let body: Value = request.body_json().unwrap_or(Value::Null);
        let count = body.as_array().map(Vec::len).unwrap_or(1);
        ResponseTemplate::new(200).set_body_json(vec![json!({"success": true}); count])
    }
}

/// Rejects records whose legal name matches
struct RejectName(&'static str);

impl Respond for RejectName {
    fn respond(&self, request: &Request) -> ResponseTemplate {
        let body: Value = request.body_json().unwrap_or(Value::Null);
        let results: Vec<Value> = body
            .as_array()
            .into_iter()
            .flatten()
            .map(|c| json!({"success": c["attributes"]["legal_name"] != self.0}))
            .collect();
        ResponseTemplate::new(200).set_body_json(results)
    }
}

async fn batch_sizes(server: &MockServer) -> Vec<usize> {
    server
        .received_requests()
        .await
        .unwrap()
        .iter()
        .map(|r| r.body_json::<Vec<Value>>().unwrap().len())
        .collect()
}

#[tokio::test]
async fn test_five_records_batch_two() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/onbis/issue-credential"))
        .respond_with(AcceptAll)
        .expect(3)
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    let input = write_credentials(dir.path(), "creds.jsonl", 5).await;
    let config = run_config(&dir, 2, 1);
    let client = AgentClient::new(agent_config(&server)).unwrap();

    let summary = LoadRunner::new(&client, &config)
        .run(std::slice::from_ref(&input))
        .await
        .unwrap();

    assert!(summary.is_complete());
    assert_eq!(summary.submitted(), 5);
    assert_eq!(summary.failed(), 0);
    assert_eq!(batch_sizes(&server).await, vec![2, 2, 1]);
    assert!(read_lines(&bad_record_path(&config.temp_dir, &input)).await.is_empty());
}

#[tokio::test]
async fn test_server_error_logs_records_and_advances() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500).set_body_string("agent exploded"))
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    let input = write_credentials(dir.path(), "creds.jsonl", 3).await;
    let config = run_config(&dir, 2, 1);
    let client = AgentClient::new(agent_config(&server)).unwrap();

    let summary = LoadRunner::new(&client, &config)
        .run(std::slice::from_ref(&input))
        .await
        .unwrap();

    // Transport failures are recorded, not fatal.
    assert!(summary.is_complete());
    assert_eq!(summary.failed(), 3);

    let bad = read_lines(&bad_record_path(&config.temp_dir, &input)).await;
    assert_eq!(bad.len(), 3);
    for (n, line) in bad.iter().enumerate() {
        let (raw, reason) = line.split_once('\t').unwrap();
        assert_eq!(serde_json::from_str::<Value>(raw).unwrap(), credential(n as u32));
        assert!(reason.contains("agent exploded"));
    }

    let file_size = tokio::fs::metadata(&input).await.unwrap().len();
    let done = tokio::fs::read_to_string(checkpoint_path(&config.temp_dir, &input, 0))
        .await
        .unwrap();
    assert_eq!(done, file_size.to_string());
}

#[tokio::test]
async fn test_rejected_record_logged_alone() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(RejectName("Company 2"))
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    let input = write_credentials(dir.path(), "creds.jsonl", 4).await;
    let config = run_config(&dir, 4, 1);
    let client = AgentClient::new(agent_config(&server)).unwrap();

    let summary = LoadRunner::new(&client, &config)
        .run(std::slice::from_ref(&input))
        .await
        .unwrap();
    assert_eq!(summary.failed(), 1);

    let bad = read_lines(&bad_record_path(&config.temp_dir, &input)).await;
    assert_eq!(bad.len(), 1);
    assert_eq!(serde_json::from_str::<Value>(&bad[0]).unwrap(), credential(2));
}

#[tokio::test]
async fn test_parallel_ranges_submit_every_record_once() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(AcceptAll)
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    let input = write_credentials(dir.path(), "creds.jsonl", 20).await;
    let config = run_config(&dir, 3, 4);
    let client = AgentClient::new(agent_config(&server)).unwrap();

    let summary = LoadRunner::new(&client, &config)
        .run(std::slice::from_ref(&input))
        .await
        .unwrap();
    assert_eq!(summary.reports.len(), 4);
    assert_eq!(summary.submitted(), 20);

    let mut names: Vec<String> = server
        .received_requests()
        .await
        .unwrap()
        .iter()
        .flat_map(|r| r.body_json::<Vec<Value>>().unwrap())
        .map(|c| c["attributes"]["corp_num"].as_str().unwrap().to_string())
        .collect();
    names.sort();
    let expected: Vec<String> = (0..20).map(|n| format!("BC{:07}", n)).collect();
    assert_eq!(names, expected);

    for range in compute_ranges(&input, 4).await.unwrap() {
        let done = checkpoint_path(&config.temp_dir, &input, range.index);
        assert_eq!(tokio::fs::read_to_string(done).await.unwrap(), range.end.to_string());
    }
}

#[tokio::test]
async fn test_interrupted_run_resumes_after_checkpoint() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(AcceptAll)
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    let input = write_credentials(dir.path(), "creds.jsonl", 6).await;
    let config = run_config(&dir, 2, 1);
    tokio::fs::create_dir_all(&config.temp_dir).await.unwrap();

    // A previous run committed after the first three lines.
    let content = tokio::fs::read_to_string(&input).await.unwrap();
    let committed: usize = content.split_inclusive('\n').take(3).map(str::len).sum();
    tokio::fs::write(checkpoint_path(&config.temp_dir, &input, 0), committed.to_string())
        .await
        .unwrap();

    let client = AgentClient::new(agent_config(&server)).unwrap();
    let summary = LoadRunner::new(&client, &config)
        .run(std::slice::from_ref(&input))
        .await
        .unwrap();

    assert_eq!(summary.submitted(), 3);
    let sent: Vec<Value> = server
        .received_requests()
        .await
        .unwrap()
        .iter()
        .flat_map(|r| r.body_json::<Vec<Value>>().unwrap())
        .collect();
    assert_eq!(sent, vec![credential(3), credential(4), credential(5)]);
}

#[tokio::test]
async fn test_per_record_mode_hits_unbatched_endpoint() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/onbis/issue-credential"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"success": true})))
        .expect(3)
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    let input = write_credentials(dir.path(), "creds.jsonl", 3).await;
    let mut config = run_config(&dir, 2, 1);
    config.mode = SubmitMode::PerRecord;
    let client = AgentClient::new(agent_config(&server)).unwrap();

    let summary = LoadRunner::new(&client, &config)
        .run(std::slice::from_ref(&input))
        .await
        .unwrap();
    assert_eq!(summary.submitted(), 3);

    for request in server.received_requests().await.unwrap() {
        let query: Vec<(String, String)> = request.url.query_pairs().into_owned().collect();
        assert!(query.contains(&("schema".to_string(), "incorporation.bc_registries".to_string())));
        let body: Value = request.body_json().unwrap();
        assert!(body.get("corp_num").is_some());
    }
}

#[tokio::test]
async fn test_split_mode_writes_chunks() {
    let dir = TempDir::new().unwrap();
    let input = write_credentials(dir.path(), "creds.jsonl", 10).await;

    let written = split_all(std::slice::from_ref(&input), 3).await.unwrap();
    assert_eq!(written.len(), 3);

    let mut total = Vec::new();
    for part in &written {
        total.extend(read_lines(part).await);
    }
    let original = read_lines(&input).await;
    assert_eq!(total, original);
}
