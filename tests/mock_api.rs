#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::time::Duration;

use meddist::api::{ApiClient, ListQuery};
use meddist::error::{ApiError, ConfigError, Error};
use meddist::forms::{
    AddressForm, CategoryForm, ChannelForm, LocationForm, LoginForm, ProductForm,
};
use meddist::screens::{
    CategoriesScreen, ChannelsScreen, LocationsScreen, LoginScreen, ProductsScreen,
};
use meddist::types::{FormMode, Severity};
use meddist::AppContext;
use secrecy::{ExposeSecret, SecretString};
use serde_json::{Value, json};
use url::Url;
use wiremock::matchers::{body_partial_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client(server: &MockServer) -> ApiClient {
    ApiClient::new(
        Url::parse(&server.uri()).expect("valid mock url"),
        Some(SecretString::from("secret-token")),
        Duration::from_secs(2),
        Duration::from_secs(1),
    )
    .expect("client")
}

fn toasts(ctx: &AppContext) -> Vec<(String, Severity)> {
    ctx.toasts
        .snapshot()
        .iter()
        .map(|toast| (toast.message().to_string(), toast.severity()))
        .collect()
}

fn product_json(id: &str) -> Value {
    json!({
        "id": id,
        "name": "Luva nitrílica",
        "brand": "Supermax",
        "price": "39.90",
        "categories": [{ "id": "c1", "name": "EPI" }],
        "images": [
            { "id": "i1", "url": "https://cdn.test/i1.png", "isPrimary": true, "isListImage": true }
        ]
    })
}

#[tokio::test]
async fn product_list_sends_token_and_filters() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/products"))
        .and(header("authorization", "Bearer secret-token"))
        .and(header("accept", "application/json"))
        .and(query_param("page", "2"))
        .and(query_param("search", "luva"))
        .and(query_param("categoryId", "c1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "products": [product_json("p1")],
            "totalPages": 3
        })))
        .expect(1)
        .mount(&server)
        .await;

    let api = client(&server);
    let ctx = AppContext::new();
    let mut screen = ProductsScreen::new(&api, &ctx);
    screen.set_search(Some("luva".into()));
    screen.set_category(Some("c1".into()));

    let products = screen.load(2).await.unwrap();
    assert_eq!(products.len(), 1);
    assert!((products[0].price - 39.9).abs() < f64::EPSILON);

    let pagination = screen.pagination();
    assert_eq!(pagination.label(), "Página 2 de 3");
    assert!(pagination.has_previous() && pagination.has_next());
    assert_eq!(
        toasts(&ctx),
        vec![("Lista atualizada.".to_string(), Severity::Success)]
    );
    assert!(!ctx.spinner.is_loading());
}

#[tokio::test]
async fn product_list_failure_shows_backend_message() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/products"))
        .respond_with(
            ResponseTemplate::new(400).set_body_json(json!({ "message": "Página inválida" })),
        )
        .mount(&server)
        .await;

    let api = client(&server);
    let ctx = AppContext::new();
    let mut screen = ProductsScreen::new(&api, &ctx);

    let err = screen.load(1).await.unwrap_err();
    assert!(matches!(
        err,
        Error::Api(ApiError::Status { status, .. }) if status.as_u16() == 400
    ));
    assert_eq!(err.server_message(), Some("Página inválida"));
    assert_eq!(
        toasts(&ctx),
        vec![("Erro: Página inválida".to_string(), Severity::Error)]
    );
    assert!(!ctx.spinner.is_loading());
}

#[tokio::test]
async fn product_list_failure_without_body_uses_generic_message() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/products"))
        .respond_with(ResponseTemplate::new(502))
        .mount(&server)
        .await;

    let api = client(&server);
    let ctx = AppContext::new();
    let mut screen = ProductsScreen::new(&api, &ctx);

    assert!(screen.load(1).await.is_err());
    assert_eq!(
        toasts(&ctx),
        vec![(
            "Um erro desconhecido aconteceu. Aguarde alguns segundos e tente novamente"
                .to_string(),
            Severity::Error
        )]
    );
}

#[tokio::test]
async fn category_options_failure_leaves_picker_empty() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/categories"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let api = client(&server);
    let ctx = AppContext::new();
    let screen = ProductsScreen::new(&api, &ctx);

    assert!(screen.category_options().await.is_empty());
    assert_eq!(
        toasts(&ctx),
        vec![("Erro ao carregar categorias.".to_string(), Severity::Error)]
    );
}

#[tokio::test]
async fn product_create_uploads_files_with_metadata() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/products"))
        .respond_with(ResponseTemplate::new(201).set_body_json(product_json("p9")))
        .expect(1)
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let image = dir.path().join("frente.png");
    std::fs::write(&image, b"fake-png-bytes").unwrap();

    let mut form = ProductForm {
        name: "Luva nitrílica".into(),
        brand: "Supermax".into(),
        price: "1.039,90".into(),
        categories: vec!["c1".into(), "c2".into()],
        ..ProductForm::default()
    };
    form.images.add_files([image]);
    assert!(form.images.set_primary(0));

    let api = client(&server);
    let ctx = AppContext::new();
    let mut screen = ProductsScreen::new(&api, &ctx);
    let saved = screen.save(&form, &FormMode::Create).await.unwrap();
    assert_eq!(saved.id, "p9");

    let requests = server.received_requests().await.unwrap();
    let request = &requests[0];
    let content_type = request.headers.get("content-type").unwrap().to_str().unwrap();
    assert!(content_type.starts_with("multipart/form-data"));

    let body = String::from_utf8_lossy(&request.body);
    assert!(body.contains("name=\"price\"\r\n\r\n1039.90"));
    assert_eq!(body.matches("name=\"categories\"").count(), 2);
    assert!(body.contains("filename=\"frente.png\""));
    assert!(body.contains("fake-png-bytes"));
    assert!(body.contains("name=\"imagesMetadata\""));
    assert!(body.contains("\"isPrimary\":true"));
    assert!(body.contains("\"position\":0"));

    assert_eq!(
        toasts(&ctx),
        vec![("Produto criado com sucesso!".to_string(), Severity::Success)]
    );
}

#[tokio::test]
async fn missing_image_file_is_toasted_as_save_failure() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/products"))
        .respond_with(ResponseTemplate::new(201).set_body_json(product_json("p9")))
        .expect(0)
        .mount(&server)
        .await;

    let mut form = ProductForm {
        name: "Luva".into(),
        brand: "Supermax".into(),
        price: "10,00".into(),
        categories: vec!["c1".into()],
        ..ProductForm::default()
    };
    form.images.add_files([std::path::PathBuf::from("/nonexistent/frente.png")]);
    form.images.set_primary(0);

    let api = client(&server);
    let ctx = AppContext::new();
    let mut screen = ProductsScreen::new(&api, &ctx);

    let err = screen.save(&form, &FormMode::Create).await.unwrap_err();
    assert!(matches!(err, Error::Api(ApiError::File { .. })));
    assert_eq!(
        toasts(&ctx),
        vec![(
            "Erro ao salvar produto. Tente novamente.".to_string(),
            Severity::Error
        )]
    );
}

#[tokio::test]
async fn category_update_patches_and_refreshes_loaded_list() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/categories"))
        .and(query_param("page", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "categories": [{ "id": "c2", "name": "Luvas", "parent": { "id": "c1", "name": "EPI" } }],
            "totalPages": 1
        })))
        .expect(2)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/categories/c2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "c2", "name": "Luvas", "parent": { "id": "c1", "name": "EPI" }
        })))
        .mount(&server)
        .await;
    Mock::given(method("PATCH"))
        .and(path("/categories/c2"))
        .and(body_partial_json(json!({ "name": "Luvas cirúrgicas", "parentId": "c1" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "c2", "name": "Luvas cirúrgicas", "parent": { "id": "c1", "name": "EPI" }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let api = client(&server);
    let ctx = AppContext::new();
    let mut screen = CategoriesScreen::new(&api, &ctx);
    screen.load(1).await.unwrap();

    let mut form: CategoryForm = screen.open("c2").await.unwrap();
    form.name = "Luvas cirúrgicas".into();
    let saved = screen
        .save(&form, &FormMode::Edit("c2".into()))
        .await
        .unwrap();
    assert_eq!(saved.name, "Luvas cirúrgicas");
    assert_eq!(
        toasts(&ctx),
        vec![(
            "Categoria atualizada com sucesso!".to_string(),
            Severity::Success
        )]
    );
}

#[tokio::test]
async fn location_create_payload() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/locations"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "id": "l1",
            "name": "CD Campinas",
            "capacity": "350",
            "address": {
                "cep": "13010-111",
                "address": "Rua Barão de Jaguara",
                "number": "1000",
                "neighborhood": "Centro",
                "city": "Campinas",
                "state": "SP"
            }
        })))
        .mount(&server)
        .await;

    let form = LocationForm {
        name: "CD Campinas".into(),
        capacity: Some(350),
        address: AddressForm {
            cep: "13010-111".into(),
            address: "Rua Barão de Jaguara".into(),
            number: "1000".into(),
            complement: "Galpão 3".into(),
            neighborhood: "Centro".into(),
            city: "Campinas".into(),
            state: "SP".into(),
        },
    };

    let api = client(&server);
    let ctx = AppContext::new();
    let mut screen = LocationsScreen::new(&api, &ctx);
    let saved = screen.save(&form, &FormMode::Create).await.unwrap();
    assert_eq!(saved.capacity, 350);

    let requests = server.received_requests().await.unwrap();
    let body: Value = serde_json::from_slice(&requests[0].body).unwrap();
    insta::with_settings!({ sort_maps => true }, {
        insta::assert_json_snapshot!("location_create_payload", body);
    });
}

#[tokio::test]
async fn invalid_form_sends_nothing_and_stays_quiet() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(201))
        .expect(0)
        .mount(&server)
        .await;

    let api = client(&server);
    let ctx = AppContext::new();
    let mut screen = ChannelsScreen::new(&api, &ctx);

    let err = screen
        .save(&ChannelForm::default(), &FormMode::Create)
        .await
        .unwrap_err();
    let errors = match err {
        Error::Validation(errors) => errors,
        other => panic!("expected validation errors, got {other:?}"),
    };
    assert_eq!(errors.get("name"), Some("O nome do canal é obrigatório"));
    assert!(ctx.toasts.is_empty());
}

#[tokio::test]
async fn channel_load_failure_is_toasted() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/channels/missing"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "message": ["channel not found"]
        })))
        .mount(&server)
        .await;

    let api = client(&server);
    let ctx = AppContext::new();
    let screen = ChannelsScreen::new(&api, &ctx);

    let err = screen.open("missing").await.unwrap_err();
    assert_eq!(err.server_message(), Some("channel not found"));
    assert_eq!(
        toasts(&ctx),
        vec![(
            "Erro ao carregar canal. Tente novamente.".to_string(),
            Severity::Error
        )]
    );
}

#[tokio::test]
async fn malformed_body_is_a_json_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/categories"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    let err = client(&server)
        .list_categories(&ListQuery::default())
        .await
        .unwrap_err();
    let message = match err {
        Error::Api(ApiError::Json { message }) => message,
        other => panic!("expected a JSON error, got {other:?}"),
    };
    assert!(message.contains("<html>oops</html>"));
}

#[tokio::test]
async fn base_path_is_preserved() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/channels"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "id": "ch1", "name": "Marketplace" }
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let api = ApiClient::new(
        Url::parse(&format!("{}/api/", server.uri())).unwrap(),
        None,
        Duration::from_secs(2),
        Duration::from_secs(1),
    )
    .unwrap();
    let channels = api.list_channels().await.unwrap();
    assert_eq!(channels[0].name, "Marketplace");
}

#[tokio::test]
async fn clearing_optional_fields_on_update_sends_them_blank() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/categories/c2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "c2",
            "name": "Luvas",
            "description": "old",
            "parent": { "id": "c1", "name": "EPI" }
        })))
        .mount(&server)
        .await;
    Mock::given(method("PATCH"))
        .and(path("/categories/c2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "c2", "name": "Luvas"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let api = client(&server);
    let ctx = AppContext::new();
    let mut screen = CategoriesScreen::new(&api, &ctx);

    let mut form = screen.open("c2").await.unwrap();
    assert_eq!(form.description, "old");
    form.description.clear();
    form.parent_id.clear();
    let saved = screen
        .save(&form, &FormMode::Edit("c2".into()))
        .await
        .unwrap();
    assert_eq!(saved.parent, None);

    let requests = server.received_requests().await.unwrap();
    let patch = requests
        .iter()
        .find(|request| request.method.as_str() == "PATCH")
        .unwrap();
    let body: Value = serde_json::from_slice(&patch.body).unwrap();
    assert_eq!(
        body,
        json!({ "name": "Luvas", "description": "", "parentId": null })
    );
}

fn login_form() -> LoginForm {
    LoginForm {
        username: "ana@meddist.com.br".into(),
        password: "s3nha".into(),
        remember_me: true,
    }
}

#[tokio::test]
async fn login_installs_token_for_later_requests() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .and(body_partial_json(json!({
            "username": "ana@meddist.com.br",
            "password": "s3nha",
            "rememberMe": true
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({ "accessToken": "fresh-token" })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/channels"))
        .and(header("authorization", "Bearer fresh-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&server)
        .await;

    let mut api = client(&server).with_login_path("auth/login");
    let ctx = AppContext::new();
    let token = LoginScreen::new(&mut api, &ctx)
        .submit(&login_form())
        .await
        .unwrap();
    assert_eq!(token.expose_secret(), "fresh-token");
    assert!(!ctx.spinner.is_loading());
    assert_eq!(toasts(&ctx), vec![("Olá".to_string(), Severity::Success)]);

    assert!(api.list_channels().await.unwrap().is_empty());
}

#[tokio::test]
async fn rejected_login_is_toasted_with_backend_message() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .respond_with(
            ResponseTemplate::new(401).set_body_json(json!({ "message": "Credenciais inválidas" })),
        )
        .expect(1)
        .mount(&server)
        .await;

    let mut api = client(&server).with_login_path("/auth/login/");
    let ctx = AppContext::new();
    let err = LoginScreen::new(&mut api, &ctx)
        .submit(&login_form())
        .await
        .unwrap_err();
    assert_eq!(err.server_message(), Some("Credenciais inválidas"));
    assert_eq!(
        toasts(&ctx),
        vec![(
            "Failed to login: Credenciais inválidas".to_string(),
            Severity::Error
        )]
    );
}

#[tokio::test]
async fn login_without_configured_path_sends_nothing() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let mut api = client(&server);
    let ctx = AppContext::new();
    let err = LoginScreen::new(&mut api, &ctx)
        .submit(&login_form())
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        Error::Config(ConfigError::MissingField {
            field: "api.login_path"
        })
    ));
    assert_eq!(toasts(&ctx)[0].1, Severity::Error);
    assert!(toasts(&ctx)[0].0.starts_with("Failed to login: "));
}

#[tokio::test]
async fn blank_credentials_skip_login_request() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let mut api = client(&server).with_login_path("auth/login");
    let ctx = AppContext::new();
    let err = LoginScreen::new(&mut api, &ctx)
        .submit(&LoginForm::default())
        .await
        .unwrap_err();
    let Error::Validation(errors) = err else {
        panic!("expected validation errors, got {err:?}");
    };
    assert_eq!(errors.get("password"), Some("Senha é obrigatória"));
    assert!(toasts(&ctx).is_empty());
}
