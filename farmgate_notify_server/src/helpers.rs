use hmac::{Hmac, Mac};
use sha2::Sha256;

/// HMAC-SHA256 of `data` under `secret`, base64 encoded. This is the signature scheme the event
/// relay applies to every callback body; see [`crate::middleware::HmacMiddlewareFactory`].
pub fn calculate_hmac(secret: &str, data: &[u8]) -> String {
    let mut mac = Hmac::<Sha256>::new_from_slice(secret.as_bytes()).expect("HMAC accepts keys of any length");
    mac.update(data);
    base64::encode(mac.finalize().into_bytes())
}

#[cfg(test)]
mod test {
    use super::calculate_hmac;

    #[test]
    fn signatures_are_deterministic_and_keyed() {
        let body = br#"{"orderId":"ord-1"}"#;
        let sig = calculate_hmac("secret-1", body);
        assert_eq!(sig, calculate_hmac("secret-1", body));
        assert_ne!(sig, calculate_hmac("secret-2", body));
        assert_ne!(sig, calculate_hmac("secret-1", br#"{"orderId":"ord-2"}"#));
    }
}
