use serde_json::Value;

use crate::rabbitmq::Result;

/// A delivery handed to the consume callback.
#[derive(Clone, Debug, PartialEq)]
pub struct Incoming {
    pub routing_key: String,
    pub delivery_tag: u64,
    pub body: Vec<u8>,
}

impl Incoming {
    pub fn new(routing_key: impl Into<String>, delivery_tag: u64, body: Vec<u8>) -> Self {
        Incoming {
            routing_key: routing_key.into(),
            delivery_tag,
            body,
        }
    }

    /// Decodes the body as JSON.
    pub fn decode(&self) -> Result<Value> {
        Ok(serde_json::from_slice(&self.body)?)
    }
}

/// Checks that an outgoing body is JSON and returns it in compact form.
pub fn encode_body(raw: &str) -> Result<Vec<u8>> {
    let value: Value = serde_json::from_str(raw)?;
    Ok(serde_json::to_vec(&value)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rabbitmq::WatcherError;
    use serde_json::json;

    #[test]
    fn test_decode_json_body() {
        let incoming = Incoming::new("songs", 1, br#"{"event":"play","id":42}"#.to_vec());
        assert_eq!(incoming.decode().unwrap(), json!({ "event": "play", "id": 42 }));
    }

    #[test]
    fn test_decode_scalar_body() {
        let incoming = Incoming::new("songs", 2, b"\"plain string\"".to_vec());
        assert_eq!(incoming.decode().unwrap(), json!("plain string"));
    }

    #[test]
    fn test_decode_malformed_body() {
        let incoming = Incoming::new("songs", 3, b"hello there".to_vec());
        assert!(matches!(incoming.decode(), Err(WatcherError::Payload(_))));
    }

    #[test]
    fn test_encode_body_compacts() {
        let body = encode_body("{ \"a\" : 1,\n \"b\": [true] }").unwrap();
        assert_eq!(body, br#"{"a":1,"b":[true]}"#.to_vec());
        assert!(encode_body("{broken").is_err());
    }
}
