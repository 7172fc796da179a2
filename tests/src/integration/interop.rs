//! # Interoperability Tests
//!
//! Everything this crate produces is checked against `k256` used directly,
//! and against published Bitcoin vectors, so a shared bug in our own
//! encode/decode pair cannot hide behind a round trip.

#[cfg(test)]
mod tests {
    use btc_identity::domain::encoding::base64_decode;
    use btc_identity::{
        double_sha256, message_preimage, sha256, DerError, KeyError, Network, PrivateKey,
        PublicKey, Signature, U256,
    };
    use k256::ecdsa::signature::hazmat::PrehashVerifier;
    use k256::ecdsa::{RecoveryId, Signature as K256Signature, SigningKey, VerifyingKey};
    use k256::elliptic_curve::sec1::ToEncodedPoint;

    use crate::init_test_tracing;

    // =============================================================================
    // TEST FIXTURES
    // =============================================================================

    fn keys() -> Vec<PrivateKey> {
        [1u64, 2, 3, 0xDEAD_BEEF, 0x1234_5678_9ABC_DEF0]
            .into_iter()
            .map(|k| PrivateKey::from_int(U256::from(k)).unwrap())
            .chain((0..5).map(|_| PrivateKey::from_random()))
            .collect()
    }

    fn k256_signing_key(key: &PrivateKey) -> SigningKey {
        SigningKey::from_bytes((&key.to_bytes()).into()).unwrap()
    }

    fn k256_verifying_key(key: &PublicKey) -> VerifyingKey {
        VerifyingKey::from_sec1_bytes(&key.to_bytes()).unwrap()
    }

    fn k256_signature(signature: &Signature) -> K256Signature {
        K256Signature::from_slice(&signature.to_bytes()).unwrap()
    }

    // =============================================================================
    // PUBLISHED VECTORS
    // =============================================================================

    /// Private key 1 and its well-known encodings.
    #[test]
    fn test_key_one_vectors() {
        let key = PrivateKey::from_int(U256::one()).unwrap();
        let public = key.public_key();

        assert_eq!(
            key.to_base58check(Network::Mainnet),
            "5HpHagT65TZzG1PH3CSu63k8DbpvD8s5ip4nEB3kEsreAnchuDf"
        );
        assert_eq!(
            public.address(false, Network::Mainnet),
            "1EHNa6Q4Jz2uvNExL497mE43ikXhwF6kZm"
        );
        assert_eq!(
            public.address(true, Network::Mainnet),
            "1BgGZ9tcN4rm9KBzDn7KprQz87SZ26SAMH"
        );
        assert_eq!(
            hex::encode(public.compressed_bytes()),
            "0279be667ef9dcbbac55a06295ce870b07029bfcdb2dce28d959f2815b16f81798"
        );
    }

    #[test]
    fn test_small_key_addresses() {
        let cases = [
            (2u64, "1cMh228HTCiwS8ZsaakH8A8wze1JR5ZsP", "n16daMq14zdjocUU5rUDVxts8449SL2VrL"),
            (3u64, "1CUNEBjYrCn2y1SdiUMohaKUi4wpP326Lb", "n35Rg6P9RAk1YiQPX2tVcQtt8ta1bZ36Z1"),
        ];

        for (k, compressed_mainnet, uncompressed_testnet) in cases {
            let key = PrivateKey::from_int(U256::from(k)).unwrap();
            assert_eq!(key.public_key().address(true, Network::Mainnet), compressed_mainnet);
            assert_eq!(key.public_key().address(false, Network::Testnet), uncompressed_testnet);
        }
    }

    // =============================================================================
    // SEC ENCODING
    // =============================================================================

    #[test]
    fn test_sec_encodings_match_k256() {
        for key in keys() {
            let reference = k256_signing_key(&key).verifying_key().to_owned();
            let public = key.public_key();

            assert_eq!(
                public.compressed_bytes().as_slice(),
                reference.to_encoded_point(true).as_bytes()
            );
            assert_eq!(
                public.to_bytes().as_slice(),
                reference.to_encoded_point(false).as_bytes()
            );
        }
    }

    #[test]
    fn test_compressed_and_uncompressed_agree_on_address() {
        for key in keys() {
            let public = key.public_key();
            let via_compressed = PublicKey::from_bytes(&public.compressed_bytes())
                .unwrap()
                .unwrap();
            let via_uncompressed = PublicKey::from_bytes(&public.to_hex()).unwrap().unwrap();

            assert_eq!(
                via_compressed.address(true, Network::Mainnet),
                via_uncompressed.address(true, Network::Mainnet)
            );
        }
    }

    // =============================================================================
    // DER
    // =============================================================================

    #[test]
    fn test_der_matches_k256() {
        for key in keys() {
            let signature = key.sign(b"der interop", true).unwrap();
            let reference = k256_signature(&signature);

            assert_eq!(signature.to_der(), reference.to_der().as_bytes());

            let parsed = Signature::from_der(reference.to_der().as_bytes()).unwrap();
            assert_eq!(parsed.r(), signature.r());
            assert_eq!(parsed.s(), signature.s());
        }
    }

    /// BIP-66 style encodings that lenient parsers accept.
    #[test]
    fn test_der_lenient_encodings_rejected() {
        init_test_tracing();
        let cases: [(&str, DerError); 4] = [
            // r padded with a needless zero
            ("300702020001020102", DerError::ExcessivelyPaddedR),
            // s read as negative
            ("3006020101020181", DerError::NegativeS),
            // junk after the sequence
            (
                "30060201010201020000",
                DerError::LengthMismatch {
                    declared: 6,
                    remaining: 8,
                },
            ),
            // long-form length
            (
                "308106020101020102",
                DerError::LengthMismatch {
                    declared: 0x81,
                    remaining: 7,
                },
            ),
        ];

        for (der, reason) in cases {
            assert_eq!(
                Signature::from_der(der).unwrap_err(),
                KeyError::from(reason),
                "input {}",
                der
            );
        }
    }

    // =============================================================================
    // SIGNING AND VERIFICATION
    // =============================================================================

    #[test]
    fn test_signatures_verify_with_k256() {
        for key in keys() {
            let signature = key.sign(b"cross check", true).unwrap();
            let digest = sha256(b"cross check");

            k256_verifying_key(key.public_key())
                .verify_prehash(&digest, &k256_signature(&signature))
                .unwrap();
        }
    }

    #[test]
    fn test_k256_signatures_verify_here() {
        for key in keys() {
            let digest = sha256(b"made by k256");
            let (reference, _) = k256_signing_key(&key)
                .sign_prehash_recoverable(&digest)
                .unwrap();
            let signature = Signature::from_bytes(reference.to_bytes().as_slice()).unwrap();

            assert!(key.public_key().verify(b"made by k256", &signature, true));
            assert!(key.public_key().verify(&digest, &signature, false));
        }
    }

    #[test]
    fn test_recovery_matches_k256() {
        for key in keys() {
            let signature = key.sign(b"recover", true).unwrap();
            let id = RecoveryId::from_byte(signature.recovery_id().unwrap()).unwrap();

            let reference =
                VerifyingKey::recover_from_prehash(&sha256(b"recover"), &k256_signature(&signature), id)
                    .unwrap();
            let recovered = PublicKey::from_signature(b"recover", &signature)
                .unwrap()
                .unwrap();

            assert_eq!(recovered, *key.public_key());
            assert_eq!(recovered.to_bytes().as_slice(), reference.to_encoded_point(false).as_bytes());
        }
    }

    // =============================================================================
    // BITCOIN SIGNED MESSAGE
    // =============================================================================

    /// bitcoind verifies `magic ∥ r ∥ s` against SHA-256d of the preimage.
    #[test]
    fn test_signed_message_is_sha256d_of_preimage() {
        for key in keys() {
            let envelope = key.sign_bitcoin_message(b"Hello, Bitcoin!").unwrap();
            let raw = base64_decode(&envelope).unwrap();
            assert_eq!(raw.len(), 65);

            let digest = double_sha256(&message_preimage(b"Hello, Bitcoin!").unwrap());
            let signature = K256Signature::from_slice(&raw[1..]).unwrap();
            k256_verifying_key(key.public_key())
                .verify_prehash(&digest, &signature)
                .unwrap();

            let id = RecoveryId::from_byte(raw[0] - 27).unwrap();
            let recovered = VerifyingKey::recover_from_prehash(&digest, &signature, id).unwrap();
            assert_eq!(
                recovered.to_encoded_point(false).as_bytes(),
                key.public_key().to_bytes().as_slice()
            );
        }
    }

    #[test]
    fn test_signed_message_round_trip() {
        for key in keys() {
            for message in [&b""[..], b"a", b"The quick brown fox", &[0xFFu8; 255]] {
                let envelope = key.sign_bitcoin_message(message).unwrap();
                assert!(PublicKey::verify_bitcoin_message(message, &envelope).unwrap());
            }
        }
    }
}
