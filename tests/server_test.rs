//! Request/response loop tests over in-memory buffers.

use foxfunx::logging::RecordingLogger;
use foxfunx::server::{handshake_line, negotiate_version, serve_io};
use foxfunx::Provider;
use serde_json::{json, Value};

async fn exchange(input: &str) -> (usize, Vec<Value>) {
    exchange_bytes(input.as_bytes()).await
}

async fn exchange_bytes(input: &[u8]) -> (usize, Vec<Value>) {
    let provider = Provider::new("test");
    let logger = RecordingLogger::new();
    let mut output: Vec<u8> = Vec::new();

    let handled = serve_io(&provider, &logger, input, &mut output)
        .await
        .expect("serve_io failed");

    let responses = String::from_utf8(output)
        .expect("utf8 output")
        .lines()
        .map(|l| serde_json::from_str(l).expect("response is json"))
        .collect();
    (handled, responses)
}

#[test]
fn test_handshake() {
    let version = negotiate_version(Some(&[5, 6])).unwrap();
    assert_eq!(handshake_line(version), "1|6|stdio|json");
    assert!(negotiate_version(Some(&[5])).is_err());
}

#[tokio::test]
async fn test_metadata_and_schema() {
    let input = concat!(
        r#"{"method":"GetMetadata"}"#,
        "\n",
        r#"{"method":"GetProviderSchema"}"#,
        "\n",
        r#"{"method":"GetFunctions"}"#,
        "\n",
    );
    let (handled, responses) = exchange(input).await;
    assert_eq!(handled, 3);

    assert_eq!(
        responses[0],
        json!({
            "type_name": "foxfunx",
            "version": "test",
            "functions": ["direxists", "tocidr"],
            "resources": [],
            "data_sources": []
        })
    );

    let schema = &responses[1];
    assert!(schema["markdown_description"]
        .as_str()
        .unwrap()
        .contains("function-only provider"));
    assert_eq!(schema["functions"]["direxists"]["return"], "bool");

    let tocidr = &responses[2]["functions"]["tocidr"];
    assert_eq!(tocidr["return"], "string");
    assert_eq!(tocidr["parameters"][0]["name"], "subnet");
    assert_eq!(tocidr["parameters"][1]["name"], "netmask");
}

#[tokio::test]
async fn test_call_function() {
    let input = concat!(
        r#"{"method":"ConfigureProvider","config":{}}"#,
        "\n",
        r#"{"method":"CallFunction","name":"tocidr","arguments":["10.10.10.0","255.255.255.0"]}"#,
        "\n",
        r#"{"method":"CallFunction","name":"tocidr","arguments":["10.10.10.0","255.255.2555.0"]}"#,
        "\n",
    );
    let (_, responses) = exchange(input).await;
    assert_eq!(responses[0], json!({}));
    assert_eq!(responses[1], json!({"result": "10.10.10.0/24"}));
    assert_eq!(responses[2]["error"]["function_argument"], 1);
    assert_eq!(
        responses[2]["error"]["text"],
        r#"not an IPv4 netmask/invalid netmask: "255.255.2555.0""#
    );
}

#[tokio::test]
async fn test_protocol_error_keeps_serving() {
    let input = concat!(
        "this is not json\n",
        "\n",
        r#"{"method":"CallFunction","name":"tocidr","arguments":["0.0.0.0","0.0.0.0"]}"#,
        "\n",
    );
    let (handled, responses) = exchange(input).await;
    assert_eq!(handled, 2);
    assert!(responses[0]["protocol_error"]
        .as_str()
        .unwrap()
        .starts_with("Error parsing request"));
    assert_eq!(responses[1], json!({"result": "0.0.0.0/0"}));
}

#[tokio::test]
async fn test_stop_provider_ends_loop() {
    let input = concat!(
        r#"{"method":"StopProvider"}"#,
        "\n",
        r#"{"method":"GetMetadata"}"#,
        "\n",
    );
    let (handled, responses) = exchange(input).await;
    assert_eq!(handled, 1);
    assert_eq!(responses, vec![json!({})]);
}

#[tokio::test]
async fn test_invalid_utf8_line_keeps_serving() {
    let mut input: Vec<u8> = Vec::new();
    input.extend_from_slice(b"{\"method\":\"GetMetadata\xff\"}\n");
    input.extend_from_slice(
        br#"{"method":"CallFunction","name":"tocidr","arguments":["10.10.10.0","255.255.255.0"]}"#,
    );
    input.push(b'\n');

    let (handled, responses) = exchange_bytes(&input).await;
    assert_eq!(handled, 2);
    assert!(responses[0]["protocol_error"]
        .as_str()
        .unwrap()
        .contains("invalid UTF-8"));
    assert_eq!(responses[1], json!({"result": "10.10.10.0/24"}));
}

#[tokio::test]
async fn test_last_line_without_newline() {
    let (handled, responses) = exchange(r#"{"method":"StopProvider"}"#).await;
    assert_eq!(handled, 1);
    assert_eq!(responses, vec![json!({})]);
}
