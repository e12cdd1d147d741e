use super::*;

fn cfg(secret: &str) -> TokenConfig {
    TokenConfig {
        secret: secret.to_string(),
        ttl_hours: 24,
    }
}

#[test]
fn minted_token_round_trips_admin_id() {
    let cfg = cfg("s3cret");
    let token = mint_admin_token(&cfg, AdminId(7)).expect("mint");
    assert_eq!(verify_admin_token(&cfg, &token).expect("verify"), AdminId(7));
}

#[test]
fn token_signed_with_other_secret_is_rejected() {
    let token = mint_admin_token(&cfg("one"), AdminId(1)).expect("mint");
    let err = verify_admin_token(&cfg("two"), &token).expect_err("should fail");
    assert!(matches!(err, TokenError::Rejected(_)));
}

#[test]
fn expired_token_is_rejected() {
    let cfg = cfg("s");
    let issued = Utc::now() - Duration::hours(3);
    let claims = AdminClaims {
        sub: "1".to_string(),
        iat: issued.timestamp(),
        exp: (issued + Duration::hours(1)).timestamp(),
    };
    let token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(cfg.secret.as_bytes()),
    )
    .expect("encode");
    assert!(matches!(
        verify_admin_token(&cfg, &token),
        Err(TokenError::Rejected(_))
    ));
}

#[test]
fn out_of_range_lifetime_is_refused() {
    for ttl_hours in [0, -2, MAX_TTL_HOURS + 1, i64::MAX] {
        let cfg = TokenConfig {
            secret: "s".to_string(),
            ttl_hours,
        };
        assert!(
            matches!(
                mint_admin_token(&cfg, AdminId(1)),
                Err(TokenError::InvalidLifetime(hours)) if hours == ttl_hours
            ),
            "{ttl_hours}"
        );
    }
    let cfg = TokenConfig {
        secret: "s".to_string(),
        ttl_hours: MAX_TTL_HOURS,
    };
    assert!(mint_admin_token(&cfg, AdminId(1)).is_ok());
}

#[test]
fn garbage_is_rejected() {
    assert!(verify_admin_token(&cfg("s"), "not-a-jwt").is_err());
}
