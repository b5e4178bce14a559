use super::builders::{product_id, ProductBuilder};
use super::TEST_SESSION_SECRET;
use catalog::admin_session::SessionClaims;
use catalog::models::{DegreeOfProtection, Product, ProductId};
use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};

pub fn cables_category() -> ProductId {
    product_id(0xC0FF_EE00)
}

/// Nine connectors with ids 1..=9.
///
/// | id | connector | pins | ratings      | stock | notes                      |
/// |----|-----------|------|--------------|-------|----------------------------|
/// | 1  | M12       | 4    | IP67         | yes   | cables category            |
/// | 2  | M8        | 3    | IP67, IP68   | yes   |                            |
/// | 3  | M12       | 4    | IP68         | no    | description mentions M12   |
/// | 4  | M8        | 4    | IP65         | yes   | cables category            |
/// | 5  | M12       | 8    | IP67         | yes   | female                     |
/// | 6  | M8        | 4    | -            | yes   | name "100% Shielded_Cable" |
/// | 7  | M12       | 4    | IP69K        | yes   | mpn "XM12-4"               |
/// | 8  | RJ45      | 8    | IP20         | yes   |                            |
/// | 9  | M8        | 4    | IP67         | yes   | code "A"                   |
pub fn connector_catalog() -> Vec<Product> {
    use DegreeOfProtection::*;

    vec![
        ProductBuilder::new(1)
            .name("M12 sensor cable 4-pin")
            .connector("M12")
            .pins(4)
            .protection(&[Ip67])
            .category(cables_category())
            .gender("male")
            .price(1250)
            .build(),
        ProductBuilder::new(2)
            .name("M8 panel socket 3-pin")
            .connector("M8")
            .pins(3)
            .protection(&[Ip67, Ip68])
            .build(),
        ProductBuilder::new(3)
            .name("Field-attachable plug")
            .description("Straight m12 plug for field assembly")
            .connector("M12")
            .pins(4)
            .protection(&[Ip68])
            .out_of_stock()
            .build(),
        ProductBuilder::new(4)
            .name("M8 extension cable 4-pin")
            .connector("M8")
            .pins(4)
            .protection(&[Ip65])
            .category(cables_category())
            .build(),
        ProductBuilder::new(5)
            .name("M12 female connector 8-pin")
            .connector("M12")
            .pins(8)
            .protection(&[Ip67])
            .gender("female")
            .build(),
        ProductBuilder::new(6)
            .name("100% Shielded_Cable")
            .connector("M8")
            .pins(4)
            .build(),
        ProductBuilder::new(7)
            .name("Washdown receptacle")
            .mpn("XM12-4")
            .connector("M12")
            .pins(4)
            .protection(&[Ip69K])
            .build(),
        ProductBuilder::new(8)
            .name("RJ45 coupler")
            .connector("RJ45")
            .pins(8)
            .protection(&[Ip20])
            .build(),
        ProductBuilder::new(9)
            .name("M8 A-coded plug")
            .connector("M8")
            .code("A")
            .pins(4)
            .protection(&[Ip67])
            .build(),
    ]
}

/// `count` plain products with ids 1..=count.
pub fn many_products(count: u128) -> Vec<Product> {
    (1..=count).map(|n| ProductBuilder::new(n).build()).collect()
}

/// Signed session token for the test secret.
pub fn session_token(role: &str, expires_in_secs: i64) -> String {
    session_token_with_secret(role, expires_in_secs, TEST_SESSION_SECRET)
}

pub fn session_token_with_secret(role: &str, expires_in_secs: i64, secret: &str) -> String {
    let exp = chrono::Utc::now().timestamp() + expires_in_secs;
    let claims = SessionClaims {
        sub: "backoffice-user".to_string(),
        role: role.to_string(),
        exp: exp.max(0) as u64,
    };
    encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .expect("encode session token")
}

pub fn admin_token() -> String {
    session_token("admin", 3600)
}
