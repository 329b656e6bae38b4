// -*- mode: rust; -*-
//
// This file is part of fennec25519.
// See LICENSE for licensing information.

//! Integration tests for ed25519 signing and verification.

use fennec25519::constants;
use fennec25519::edwards::EdwardsPoint;
use fennec25519::scalar::clamp_integer;
use fennec25519::traits::IsIdentity;
use fennec25519::*;

use sha2::Digest;

#[cfg(test)]
mod vectors {
    use super::*;

    struct TestVector {
        secret_key: &'static str,
        public_key: &'static str,
        message: &'static str,
        signature: &'static str,
    }

    // From https://tools.ietf.org/html/rfc8032#section-7.1
    static RFC8032_TEST_VECTORS: &[TestVector] = &[
        // TEST 1: empty message
        TestVector {
            secret_key: "9d61b19deffd5a60ba844af492ec2cc44449c5697b326919703bac031cae7f60",
            public_key: "d75a980182b10ab7d54bfed3c964073a0ee172f3daa62325af021a68f707511a",
            message: "",
            signature: "e5564300c360ac729086e2cc806e828a84877f1eb8e5d974d873e06522490155\
                        5fb8821590a33bacc61e39701cf9b46bd25bf5f0595bbe24655141438e7a100b",
        },
        // TEST 2: one-byte message 0x72
        TestVector {
            secret_key: "4ccd089b28ff96da9db6c346ec114e0f5b8a319f35aba624da8cf6ed4fb8a6fb",
            public_key: "3d4017c3e843895a92b70aa74d1b7ebc9c982ccf2ec4968cc0cd55f12af4660c",
            message: "72",
            signature: "92a009a9f0d4cab8720e820b5f642540a2b27b5416503f8fb3762223ebdb69da\
                        085ac1e43e15996e458f3613d0f11d8c387b2eaeb4302aeeb00d291612bb0c00",
        },
        // TEST 3: two-byte message af82
        TestVector {
            secret_key: "c5aa8df43f9f837bedb7442f31dcb7b166d38535076f094b85ce3a2e0b4458f7",
            public_key: "fc51cd8e6218a1a38da47ed00230f0580816ed13ba3303ac5deb911548908025",
            message: "af82",
            signature: "6291d657deec24024827e69c3abe01a30ce548a284743a445e3680d7db5ac3ac\
                        18ff9b538d16f290ae67f760984dc6594a7c15e9716ed28dc027beceea1ec40a",
        },
    ];

    #[test]
    fn rfc8032_key_derivation() {
        for vector in RFC8032_TEST_VECTORS {
            let secret = SecretKey::from_hex(vector.secret_key).unwrap();
            let public = PublicKey::from(&secret);
            assert_eq!(public.to_hex(), vector.public_key);
        }
    }

    #[test]
    fn rfc8032_signing() {
        for vector in RFC8032_TEST_VECTORS {
            let secret = SecretKey::from_hex(vector.secret_key).unwrap();
            let keypair = Keypair::from_secret(secret);
            let message = hex::decode(vector.message).unwrap();

            let signature = keypair.sign(&message);
            assert_eq!(signature.to_hex(), vector.signature);
        }
    }

    #[test]
    fn rfc8032_verification() {
        for vector in RFC8032_TEST_VECTORS {
            let public = PublicKey::from_hex(vector.public_key).unwrap();
            let message = hex::decode(vector.message).unwrap();
            let signature = Signature::from_hex(vector.signature).unwrap();

            assert_eq!(public.verify(&message, &signature), Ok(true));
            assert_eq!(public.verify_strict(&message, &signature), Ok(true));
        }
    }

    /// `[1]B` encodes to the standard basepoint encoding.
    #[test]
    fn basepoint_multiply_one() {
        let one = fennec25519::scalar::Scalar::ONE;
        let B = EdwardsPoint::mul_base(&one);
        assert_eq!(
            B.to_hex(),
            "5866666666666666666666666666666666666666666666666666666666666666"
        );
    }

    /// `[l]B` is the identity.
    #[test]
    fn basepoint_multiply_group_order() {
        let lB = &constants::ED25519_BASEPOINT_POINT * &constants::BASEPOINT_ORDER;
        assert!(lB.is_identity());
    }

    /// Decoding the all-zero y with the sign bit set must fail.
    #[test]
    fn from_hex_of_negative_zero_fails() {
        assert!(EdwardsPoint::from_hex(
            "0000000000000000000000000000000000000000000000000000000000000080"
        )
        .is_err());
    }
}

#[cfg(test)]
mod integrations {
    use super::*;

    #[test]
    fn sign_verify_round_trip() {
        let seeds: &[u64] = &[0, 1, 2, 42, 0xdeadbeef, u64::MAX];
        let messages: &[&[u8]] = &[
            b"",
            b"a",
            b"This is a test of the tsunami alert system.",
            &[0u8; 1024],
        ];

        for &seed in seeds {
            let keypair = Keypair::from_secret(SecretKey::from(seed));
            for &message in messages {
                let signature = keypair.sign(message);
                assert_eq!(
                    keypair.verify(message, &signature),
                    Ok(true),
                    "seed {} failed to verify its own signature",
                    seed
                );
            }
        }
    }

    /// A signature over one message does not verify over another.
    #[test]
    fn verify_rejects_wrong_message() {
        let keypair = Keypair::from_secret(SecretKey::from(7u64));
        let good: &[u8] = b"this is a message";
        let bad: &[u8] = b"this is a massage";

        let signature = keypair.sign(good);
        assert_eq!(keypair.verify(good, &signature), Ok(true));
        assert_eq!(keypair.verify(bad, &signature), Ok(false));
    }

    /// Flipping any single bit of the signature must prevent
    /// verification.  Depending on the bit, the corruption is caught
    /// either at parse time (`s` out of range), at `R` decoding
    /// (an error), or by the verification equation (`Ok(false)`);
    /// what never happens is `Ok(true)`.
    #[test]
    fn tampered_signature_fails() {
        let keypair = Keypair::from_secret(SecretKey::from(99u64));
        let message: &[u8] = b"untamperable";
        let sig_bytes = keypair.sign(message).to_bytes();

        for bit in 0..512 {
            let mut tampered = sig_bytes;
            tampered[bit / 8] ^= 1 << (bit % 8);
            let accepted = match Signature::from_bytes(&tampered) {
                Ok(sig) => keypair.verify(message, &sig) == Ok(true),
                Err(_) => false,
            };
            assert!(!accepted, "flipping signature bit {} was accepted", bit);
        }
    }

    /// Flipping any single bit of the message must prevent
    /// verification.
    #[test]
    fn tampered_message_fails() {
        let keypair = Keypair::from_secret(SecretKey::from(1234u64));
        let message = *b"thirty-two bytes of mess to sign";
        let signature = keypair.sign(&message);

        for bit in 0..256 {
            let mut tampered = message;
            tampered[bit / 8] ^= 1 << (bit % 8);
            assert_eq!(keypair.verify(&tampered, &signature), Ok(false));
        }
    }

    /// Flipping any single bit of the public key must prevent
    /// verification (either the key no longer decodes, or the
    /// equation fails).
    #[test]
    fn tampered_public_key_fails() {
        let keypair = Keypair::from_secret(SecretKey::from(31337u64));
        let message: &[u8] = b"check the other key";
        let signature = keypair.sign(message);
        let pk_bytes = keypair.public.to_bytes();

        for bit in 0..256 {
            let mut tampered = pk_bytes;
            tampered[bit / 8] ^= 1 << (bit % 8);
            let accepted = match PublicKey::from_bytes(&tampered) {
                Ok(pk) => pk.verify(message, &signature) == Ok(true),
                Err(_) => false,
            };
            assert!(!accepted, "flipping public key bit {} was accepted", bit);
        }
    }

    /// A signature whose `s` is replaced by `s + l` must be rejected
    /// by the strict parser, even though it satisfies the verification
    /// equation modulo `l`.
    #[test]
    fn non_canonical_s_is_rejected() {
        let keypair = Keypair::from_secret(SecretKey::from(5u64));
        let message: &[u8] = b"strictly canonical";
        let signature = keypair.sign(message);

        let mut bytes = signature.to_bytes();
        // Add l to s as 256-bit little-endian integers.
        let ell = constants::BASEPOINT_ORDER.to_bytes();
        let mut carry = 0u16;
        for i in 0..32 {
            let sum = bytes[32 + i] as u16 + ell[i] as u16 + carry;
            bytes[32 + i] = sum as u8;
            carry = sum >> 8;
        }

        assert!(Signature::from_bytes(&bytes).is_err());
    }

    /// The two surface forms of the seed produce identical keys, and
    /// outputs are available in the shape matching the inputs.
    #[test]
    fn input_forms_agree() {
        let seed_hex = "2000000000000000000000000000000000000000000000000000000000000000";
        let mut seed_bytes = [0u8; 32];
        seed_bytes[0] = 0x20;

        let from_hex = SecretKey::from_hex(seed_hex).unwrap();
        let from_bytes = SecretKey::from_bytes(&seed_bytes).unwrap();
        let from_int = SecretKey::from(0x20u64);

        assert_eq!(from_hex.as_bytes(), from_bytes.as_bytes());
        assert_eq!(from_bytes.as_bytes(), from_int.as_bytes());

        let pk = PublicKey::from(&from_hex);
        assert_eq!(pk.to_hex(), hex::encode(pk.to_bytes()));

        let keypair = Keypair::from_secret(from_hex);
        let sig = keypair.sign(b"shapes");
        let sig_from_hex = Signature::from_hex(&sig.to_hex()).unwrap();
        let sig_from_bytes = Signature::from_bytes(&sig.to_bytes()).unwrap();
        assert_eq!(sig, sig_from_hex);
        assert_eq!(sig, sig_from_bytes);
    }

    /// The derived secret scalar is clamped before reduction: a
    /// multiple of 8 in [2^253, 2^254).
    #[test]
    fn derived_scalars_are_clamped() {
        for seed in 0u64..32 {
            let secret = SecretKey::from(seed);
            let mut h = sha2::Sha512::new();
            h.update(secret.as_bytes());
            let hash = h.finalize();
            let mut lower = [0u8; 32];
            lower.copy_from_slice(&hash[..32]);
            let a = clamp_integer(lower);

            // a mod 8 == 0
            assert_eq!(a[0] & 0b0000_0111, 0);
            // 2^253 <= a < 2^254
            assert_eq!(a[31] >> 6, 0b01);
        }
    }

    /// Verifying with a signature assembled from components matches
    /// the byte path.
    #[test]
    fn signature_components_round_trip() {
        let keypair = Keypair::from_secret(SecretKey::from(77u64));
        let message: &[u8] = b"component forms";
        let signature = keypair.sign(message);

        let (r, s) = signature.to_components();
        let reassembled = Signature::from_components(r, s);
        assert_eq!(keypair.verify(message, &reassembled), Ok(true));
    }
}

#[cfg(all(test, feature = "serde"))]
mod serialisation {
    use super::*;

    #[test]
    fn serialize_deserialize_signature() {
        let keypair = Keypair::from_secret(SecretKey::from(3u64));
        let signature = keypair.sign(b"bincode me");

        let encoded = bincode::serialize(&signature).unwrap();
        let decoded: Signature = bincode::deserialize(&encoded).unwrap();

        assert_eq!(signature, decoded);
    }

    #[test]
    fn serialize_deserialize_public_key() {
        let keypair = Keypair::from_secret(SecretKey::from(4u64));

        let encoded = bincode::serialize(&keypair.public).unwrap();
        let decoded: PublicKey = bincode::deserialize(&encoded).unwrap();

        assert_eq!(keypair.public, decoded);
    }

    #[test]
    fn serialize_deserialize_secret_key() {
        let secret = SecretKey::from(5u64);

        let encoded = bincode::serialize(&secret).unwrap();
        let decoded: SecretKey = bincode::deserialize(&encoded).unwrap();

        assert_eq!(secret.as_bytes(), decoded.as_bytes());
    }
}
