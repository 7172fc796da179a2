//! # Integration Test Flows
//!
//! Wallet-level flows through `KeyIdentityService`:
//!
//! 1. **Key lifecycle**: generate → export (WIF) → import → same key and address
//! 2. **Signed messages**: sign → verify against the signer's address
//! 3. **Bulk verification**: mixed valid/invalid batches across threads

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::thread;

    use btc_identity::{
        BatchVerificationRequest, IdentityConfigBuilder, KeyError, KeyIdentityApi,
        KeyIdentityService, Network, PrivateKey, PublicKey, RecoveryFailure, Signature,
        VerificationRequest, U256,
    };
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    use crate::init_test_tracing;

    // =============================================================================
    // TEST FIXTURES
    // =============================================================================

    fn service(network: Network) -> KeyIdentityService {
        KeyIdentityService::new(
            IdentityConfigBuilder::new()
                .network(network)
                .max_batch_size(256)
                .build()
                .unwrap(),
        )
        .unwrap()
    }

    fn signed_request(key: &PrivateKey, message: Vec<u8>) -> VerificationRequest {
        let signature = key.sign(&message, true).unwrap();
        VerificationRequest {
            public_key: *key.public_key(),
            message,
            signature,
            hash_first: true,
        }
    }

    // =============================================================================
    // KEY LIFECYCLE
    // =============================================================================

    #[test]
    fn test_key_lifecycle_on_both_networks() {
        init_test_tracing();

        for network in [Network::Mainnet, Network::Testnet] {
            let service = service(network);
            let key = service.generate_key();
            let address = service.address(key.public_key());

            let wif = service.export_key(&key);
            let imported = service.import_key(&wif).unwrap();

            assert_eq!(imported, key);
            assert_eq!(service.address(imported.public_key()), address);
            assert_eq!(PrivateKey::from_hex(&key.to_hex()).unwrap(), key);
        }
    }

    #[test]
    fn test_address_prefixes_by_network() {
        let key = PrivateKey::from_int(U256::from(0xABCDEFu64)).unwrap();

        let mainnet = service(Network::Mainnet).address(key.public_key());
        let testnet = service(Network::Testnet).address(key.public_key());

        assert!(mainnet.starts_with('1'));
        assert!(testnet.starts_with('m') || testnet.starts_with('n'));
    }

    #[test]
    fn test_corrupted_wif_rejected() {
        let service = service(Network::Mainnet);
        let wif = service.export_key(&PrivateKey::from_int(U256::from(77)).unwrap());

        let mut chars: Vec<char> = wif.chars().collect();
        chars[10] = if chars[10] == 'z' { 'y' } else { 'z' };
        let corrupted: String = chars.into_iter().collect();

        assert!(matches!(
            service.import_key(&corrupted),
            Err(KeyError::InvalidEncoding(_))
        ));
    }

    // =============================================================================
    // SIGNED MESSAGES
    // =============================================================================

    #[test]
    fn test_sign_and_verify_message_flow() {
        init_test_tracing();
        let service = service(Network::Mainnet);
        let alice = service.generate_key();
        let bob = service.generate_key();
        let alice_address = service.address(alice.public_key());

        let envelope = service
            .sign_message(&alice, b"I own this address")
            .unwrap();

        let verification = service.verify_message(&alice_address, b"I own this address", &envelope);
        assert!(verification.valid);
        assert_eq!(verification.recovered_address, Some(alice_address.clone()));

        // Same envelope, Bob's address
        let bob_address = service.address(bob.public_key());
        assert!(!service.verify_message(&bob_address, b"I own this address", &envelope).valid);

        // Same envelope, altered message
        assert!(!service.verify_message(&alice_address, b"I own this addresS", &envelope).valid);
    }

    #[test]
    fn test_message_length_limit() {
        let service = service(Network::Mainnet);
        let key = service.generate_key();

        assert!(service.sign_message(&key, &[b'a'; 255]).is_ok());
        assert_eq!(
            service.sign_message(&key, &[b'a'; 256]).unwrap_err(),
            KeyError::MessageTooLong { len: 256 }
        );
    }

    #[test]
    fn test_recovery_probe_distinguishes_none_from_error() {
        let key = PrivateKey::from_int(U256::from(4242)).unwrap();
        let signature = key.sign(b"probe", true).unwrap();

        // Correct id recovers the signer
        assert_eq!(
            PublicKey::from_signature(b"probe", &signature).unwrap(),
            Some(*key.public_key())
        );

        // Missing id is an error
        let bare = Signature::new(signature.r(), signature.s(), None);
        assert_eq!(
            PublicKey::from_signature(b"probe", &bare).unwrap_err(),
            KeyError::RecoveryUnavailable(RecoveryFailure::MissingRecoveryId)
        );

        // An all-zero signature is an error, never a bogus key
        let zero = Signature::from_bytes(&[0u8; 64]).unwrap().with_recovery_id(0);
        assert!(matches!(
            PublicKey::from_signature(b"probe", &zero),
            Err(KeyError::RecoveryUnavailable(_))
        ));

        // Every id either recovers some key or reports no match
        for id in 0..4 {
            let probe = signature.with_recovery_id(id);
            assert!(PublicKey::from_signature(b"probe", &probe).is_ok());
        }
    }

    // =============================================================================
    // BULK VERIFICATION
    // =============================================================================

    #[test]
    fn test_mixed_batch() {
        init_test_tracing();
        let service = service(Network::Mainnet);
        let mut rng = StdRng::seed_from_u64(10);
        let keys: Vec<PrivateKey> = (0..16).map(|_| PrivateKey::from_rng(&mut rng)).collect();

        let mut requests: Vec<VerificationRequest> = keys
            .iter()
            .map(|key| {
                let message: Vec<u8> = (0..64).map(|_| rng.gen()).collect();
                signed_request(key, message)
            })
            .collect();

        // Corrupt every fourth request
        for request in requests.iter_mut().step_by(4) {
            request.message[0] ^= 0xFF;
        }

        let result = service
            .batch_verify(&BatchVerificationRequest { requests })
            .unwrap();

        assert_eq!(result.valid_count, 12);
        assert_eq!(result.invalid_count, 4);
        for (i, outcome) in result.results.iter().enumerate() {
            assert_eq!(outcome.valid, i % 4 != 0, "request {}", i);
        }
    }

    #[test]
    fn test_service_shared_across_threads() {
        let service = Arc::new(service(Network::Testnet));

        let handles: Vec<_> = (0..4)
            .map(|i| {
                let service = Arc::clone(&service);
                thread::spawn(move || {
                    let key = service.generate_key();
                    let message = format!("thread {}", i);
                    let envelope = service.sign_message(&key, message.as_bytes()).unwrap();
                    let address = service.address(key.public_key());
                    service
                        .verify_message(&address, message.as_bytes(), &envelope)
                        .valid
                })
            })
            .collect();

        for handle in handles {
            assert!(handle.join().unwrap());
        }
    }
}
