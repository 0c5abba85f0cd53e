#![allow(dead_code)]

use meshstack_action::run_context::encode_run_payload;
use serde_json::{json, Value};
use std::collections::BTreeMap;
use std::io::{BufRead, BufReader, Read, Write};
use std::net::{TcpListener, TcpStream};
use std::path::Path;
use std::process::{Command, Output};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::{Duration, Instant};

pub const RUN_UUID: &str = "b3116611-e08b-4b00-91c5-10365b25a6ef";
pub const RUN_MEDIA_TYPE: &str = "application/vnd.meshcloud.api.meshbuildingblockrun.v1.hal+json";

const ACCEPT_DEADLINE: Duration = Duration::from_secs(15);
const EXTRA_REQUEST_GRACE: Duration = Duration::from_millis(200);

#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: String,
    pub path: String,
    pub headers: BTreeMap<String, String>,
    pub body: String,
}

impl RecordedRequest {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .get(&name.to_ascii_lowercase())
            .map(String::as_str)
    }

    pub fn json_body(&self) -> Value {
        serde_json::from_str(&self.body).expect("request body is json")
    }
}

pub struct MockServer {
    pub base_url: String,
    listener: Option<TcpListener>,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
    extra_connections: Arc<Mutex<usize>>,
    handle: Option<thread::JoinHandle<()>>,
}

impl MockServer {
    /// Binds a listener without serving yet, so responders can embed
    /// `base_url` in their bodies.
    pub fn bind() -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").expect("bind mock server");
        listener
            .set_nonblocking(true)
            .expect("nonblocking listener");
        let addr = listener.local_addr().expect("local addr");
        Self {
            base_url: format!("http://{addr}"),
            listener: Some(listener),
            requests: Arc::new(Mutex::new(Vec::new())),
            extra_connections: Arc::new(Mutex::new(0usize)),
            handle: None,
        }
    }

    /// Serves `expected_requests` requests, answering each with the
    /// `(status, body)` the responder returns for `(method, path)`.
    pub fn start<F>(expected_requests: usize, responder: F) -> Self
    where
        F: Fn(&str, &str) -> (u16, String) + Send + Sync + 'static,
    {
        let mut server = Self::bind();
        server.serve(expected_requests, responder);
        server
    }

    pub fn serve<F>(&mut self, expected_requests: usize, responder: F)
    where
        F: Fn(&str, &str) -> (u16, String) + Send + Sync + 'static,
    {
        let listener = self.listener.take().expect("server is already serving");
        let requests_for_thread = Arc::clone(&self.requests);
        let extra_for_thread = Arc::clone(&self.extra_connections);

        self.handle = Some(thread::spawn(move || {
            for _ in 0..expected_requests {
                let Some(stream) = accept_until(&listener, Instant::now() + ACCEPT_DEADLINE)
                else {
                    return;
                };
                let request = serve_one(stream, &responder);
                requests_for_thread
                    .lock()
                    .expect("lock requests")
                    .push(request);
            }
            let grace = Instant::now() + EXTRA_REQUEST_GRACE;
            while accept_until(&listener, grace).is_some() {
                *extra_for_thread.lock().expect("lock extra") += 1;
            }
        }));
    }

    pub fn finish(mut self) -> Vec<RecordedRequest> {
        if let Some(handle) = self.handle.take() {
            handle.join().expect("join mock server");
        }
        self.requests.lock().expect("lock requests").clone()
    }

    /// Like [`MockServer::finish`], also returning connections made after
    /// the expected requests were served.
    pub fn finish_counting_extra(mut self) -> (Vec<RecordedRequest>, usize) {
        if let Some(handle) = self.handle.take() {
            handle.join().expect("join mock server");
        }
        let extra = *self.extra_connections.lock().expect("lock extra");
        (self.requests.lock().expect("lock requests").clone(), extra)
    }
}

fn accept_until(listener: &TcpListener, deadline: Instant) -> Option<TcpStream> {
    loop {
        match listener.accept() {
            Ok((stream, _)) => {
                stream.set_nonblocking(false).expect("blocking stream");
                return Some(stream);
            }
            Err(err) if err.kind() == std::io::ErrorKind::WouldBlock => {
                if Instant::now() >= deadline {
                    return None;
                }
                thread::sleep(Duration::from_millis(10));
            }
            Err(err) => panic!("accept failed: {err}"),
        }
    }
}

fn serve_one<F>(mut stream: TcpStream, responder: &F) -> RecordedRequest
where
    F: Fn(&str, &str) -> (u16, String),
{
    let mut reader = BufReader::new(stream.try_clone().expect("clone stream"));
    let mut request_line = String::new();
    reader
        .read_line(&mut request_line)
        .expect("read request line");
    let mut parts = request_line.split_whitespace();
    let method = parts.next().unwrap_or("GET").to_string();
    let path = parts.next().unwrap_or("/").to_string();

    let mut headers = BTreeMap::new();
    loop {
        let mut line = String::new();
        reader.read_line(&mut line).expect("read header");
        if line == "\r\n" || line.is_empty() {
            break;
        }
        if let Some((name, value)) = line.split_once(':') {
            headers.insert(name.trim().to_ascii_lowercase(), value.trim().to_string());
        }
    }

    let content_length = headers
        .get("content-length")
        .and_then(|v| v.parse::<usize>().ok())
        .unwrap_or(0);
    let mut body = vec![0_u8; content_length];
    if content_length > 0 {
        reader.read_exact(&mut body).expect("read body");
    }

    let (status, response_body) = responder(&method, &path);
    let response = format!(
        "HTTP/1.1 {status} {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
        reason_phrase(status),
        response_body.len(),
        response_body
    );
    stream
        .write_all(response.as_bytes())
        .expect("write response");

    RecordedRequest {
        method,
        path,
        headers,
        body: String::from_utf8_lossy(&body).to_string(),
    }
}

fn reason_phrase(status: u16) -> &'static str {
    match status {
        200 => "OK",
        201 => "Created",
        401 => "Unauthorized",
        403 => "Forbidden",
        404 => "Not Found",
        500 => "Internal Server Error",
        _ => "Status",
    }
}

pub fn run_path() -> String {
    format!("/api/meshobjects/meshbuildingblockruns/{RUN_UUID}")
}

pub fn status_path() -> String {
    format!("{}/status/source", run_path())
}

/// A run resource whose links point at `base_url`.
pub fn sample_run(base_url: &str, inputs: Value) -> Value {
    json!({
        "kind": "meshBuildingBlockRun",
        "apiVersion": "v1",
        "metadata": {"uuid": RUN_UUID},
        "spec": {
            "runNumber": 1,
            "buildingBlock": {
                "uuid": "68ce5455-2a4a-4a4b-a324-6a6c18cab85a",
                "spec": {
                    "displayName": "block",
                    "workspaceIdentifier": "my-workspace",
                    "projectIdentifier": "my-project",
                    "inputs": inputs,
                    "parentBuildingBlocks": []
                }
            },
            "behavior": "APPLY"
        },
        "status": "IN_PROGRESS",
        "_links": {
            "self": {"href": format!("{base_url}{}", run_path())},
            "registerSource": {"href": format!("{base_url}{}", status_path())},
            "meshstackBaseUrl": {"href": base_url}
        }
    })
}

pub fn default_inputs() -> Value {
    json!([
        {"key": "variable-name", "value": "some-value", "type": "STRING",
         "isSensitive": false, "isEnvironment": false}
    ])
}

pub fn encoded_run(base_url: &str, inputs: Value) -> String {
    encode_run_payload(&sample_run(base_url, inputs)).expect("encode run")
}

/// Writes a workflow_dispatch event carrying `payload` and returns its path.
pub fn write_dispatch_event(dir: &Path, payload: &str) -> String {
    let path = dir.join("event.json");
    std::fs::write(
        &path,
        json!({"inputs": {"buildingBlockRun": payload}}).to_string(),
    )
    .expect("write event");
    path.display().to_string()
}

pub fn run_action(args: &[&str], envs: &[(&str, &str)]) -> Output {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_meshstack-action"));
    cmd.env_clear().args(args);
    for (key, value) in envs {
        cmd.env(key, value);
    }
    cmd.output().expect("run meshstack-action")
}

pub fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).to_string()
}

pub fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).to_string()
}

pub fn assert_ok(output: &Output) {
    assert!(
        output.status.success(),
        "stdout:\n{}\nstderr:\n{}",
        stdout(output),
        stderr(output)
    );
}

pub fn assert_err_contains(output: &Output, needle: &str) {
    assert!(
        !output.status.success(),
        "expected failure, stdout:\n{}\nstderr:\n{}",
        stdout(output),
        stderr(output)
    );
    let text = format!("{}{}", stdout(output), stderr(output));
    assert!(
        text.contains(needle),
        "expected error to contain `{needle}`, got:\n{text}"
    );
}

pub fn read_outputs(path: &Path) -> BTreeMap<String, String> {
    let raw = std::fs::read_to_string(path).unwrap_or_default();
    meshstack_action::runner::outputs::parse_output_file(&raw)
        .into_iter()
        .collect()
}
