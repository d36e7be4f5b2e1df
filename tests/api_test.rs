// tests/api_test.rs
//
// Testes de integração: sobem o router real com uma base SQLite em
// memória e conversam com ele via tower::ServiceExt::oneshot.
use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use http_body_util::BodyExt;
use reposicoes::state::{AppConfig, AppState};
use reposicoes::web::routes::create_router;
use serde_json::{json, Value};
use sqlx::sqlite::SqlitePoolOptions;
use tower::ServiceExt;

async fn test_router() -> Router {
    // Uma única conexão: cada conexão sqlite::memory: teria a sua
    // própria base de dados.
    let db_pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .expect("pool em memória");

    sqlx::migrate!("./migrations")
        .run(&db_pool)
        .await
        .expect("migrações");

    let config = AppConfig {
        jwt_secret: "segredo-de-teste".to_string(),
    };

    create_router(AppState { db_pool, config })
}

fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .expect("request válida")
}

fn json_request_auth(method: &str, uri: &str, token: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .header(header::AUTHORIZATION, format!("Bearer {}", token))
        .body(Body::from(body.to_string()))
        .expect("request válida")
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("corpo da resposta")
        .to_bytes();
    serde_json::from_slice(&bytes).expect("corpo JSON")
}

/// Cria um usuário via API e devolve (id, token de login).
async fn criar_usuario_e_logar(app: &Router, email: &str, position: &str) -> (i64, String) {
    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/users",
            json!({
                "name": "Usuário de Teste",
                "email": email,
                "password": "senha123",
                "position": position,
            }),
        ))
        .await
        .expect("resposta");
    assert_eq!(response.status(), StatusCode::CREATED);
    let user = body_json(response).await;
    let id = user["id"].as_i64().expect("id do usuário");

    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/users/login",
            json!({ "email": email, "password": "senha123" }),
        ))
        .await
        .expect("resposta");
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    let token = body["token"].as_str().expect("token").to_string();

    (id, token)
}

async fn criar_aluno(app: &Router, token: &str, rgm: &str, email: &str) -> Value {
    let response = app
        .clone()
        .oneshot(json_request_auth(
            "POST",
            "/students",
            token,
            json!({
                "name": "Aluno de Teste",
                "email": email,
                "rgm": rgm,
                "current_semester": "7 Semestre",
            }),
        ))
        .await
        .expect("resposta");
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await
}

#[tokio::test]
async fn login_devolve_token_e_usuario_sem_senha() {
    let app = test_router().await;

    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/users",
            json!({
                "name": "Maria",
                "email": "maria@example.com",
                "password": "senha123",
                "position": "Coordenacao",
            }),
        ))
        .await
        .expect("resposta");
    assert_eq!(response.status(), StatusCode::CREATED);
    let created = body_json(response).await;
    assert!(created.get("password").is_none());

    // Senha errada: 401 com mensagem genérica
    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/users/login",
            json!({ "email": "maria@example.com", "password": "errada" }),
        ))
        .await
        .expect("resposta");
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    // Senha certa: user sem o campo password + token não vazio
    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/users/login",
            json!({ "email": "maria@example.com", "password": "senha123" }),
        ))
        .await
        .expect("resposta");
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert!(body["user"].get("password").is_none());
    assert_eq!(body["user"]["position"], "Coordenacao");
    assert!(!body["token"].as_str().expect("token").is_empty());
}

#[tokio::test]
async fn login_sem_campos_obrigatorios_devolve_400() {
    let app = test_router().await;

    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/users/login",
            json!({ "email": "maria@example.com" }),
        ))
        .await
        .expect("resposta");
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn email_duplicado_devolve_409() {
    let app = test_router().await;
    criar_usuario_e_logar(&app, "dup@example.com", "Preceptor").await;

    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/users",
            json!({
                "name": "Outra Pessoa",
                "email": "dup@example.com",
                "password": "outra123",
            }),
        ))
        .await
        .expect("resposta");
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn agendamento_duplicado_no_mesmo_turno_devolve_409() {
    let app = test_router().await;
    let (user_id, token) = criar_usuario_e_logar(&app, "coord@example.com", "Coordenacao").await;

    let payload = json!({
        "schedule_date": "2025-12-25",
        "shift": "Manhã",
        "max_capacity": 50,
    });

    let response = app
        .clone()
        .oneshot(json_request_auth("POST", "/schedules", &token, payload.clone()))
        .await
        .expect("resposta");
    assert_eq!(response.status(), StatusCode::CREATED);
    let schedule = body_json(response).await;
    assert!(schedule["id"].as_i64().expect("id") > 0);
    assert_eq!(schedule["max_capacity"], 50);
    assert_eq!(schedule["created_by_user_id"], user_id);

    // Mesma data + mesmo turno: recusado
    let response = app
        .clone()
        .oneshot(json_request_auth("POST", "/schedules", &token, payload))
        .await
        .expect("resposta");
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn data_com_tres_agendamentos_recusa_o_quarto() {
    let app = test_router().await;
    let (_, token) = criar_usuario_e_logar(&app, "coord2@example.com", "Coordenacao").await;

    for shift in ["Manhã", "Tarde", "Noite"] {
        let response = app
            .clone()
            .oneshot(json_request_auth(
                "POST",
                "/schedules",
                &token,
                json!({ "schedule_date": "2026-03-10", "shift": shift }),
            ))
            .await
            .expect("resposta");
        assert_eq!(response.status(), StatusCode::CREATED);
    }

    // Quarto agendamento na mesma data: 409, independente do turno
    let response = app
        .clone()
        .oneshot(json_request_auth(
            "POST",
            "/schedules",
            &token,
            json!({ "schedule_date": "2026-03-10", "shift": "Manhã" }),
        ))
        .await
        .expect("resposta");
    assert_eq!(response.status(), StatusCode::CONFLICT);

    // Outra data continua livre
    let response = app
        .clone()
        .oneshot(json_request_auth(
            "POST",
            "/schedules",
            &token,
            json!({ "schedule_date": "2026-03-11", "shift": "Manhã" }),
        ))
        .await
        .expect("resposta");
    assert_eq!(response.status(), StatusCode::CREATED);
}

#[tokio::test]
async fn agendamento_exige_token_e_posicao() {
    let app = test_router().await;
    let (_, preceptor_token) =
        criar_usuario_e_logar(&app, "preceptor@example.com", "Preceptor").await;

    // Sem token: 401
    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/schedules",
            json!({ "schedule_date": "2026-04-01", "shift": "Tarde" }),
        ))
        .await
        .expect("resposta");
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    // Preceptor pode criar
    let response = app
        .clone()
        .oneshot(json_request_auth(
            "POST",
            "/schedules",
            &preceptor_token,
            json!({ "schedule_date": "2026-04-01", "shift": "Tarde" }),
        ))
        .await
        .expect("resposta");
    assert_eq!(response.status(), StatusCode::CREATED);
    let schedule = body_json(response).await;
    let id = schedule["id"].as_i64().expect("id");

    // ... mas não pode alterar nem remover: exclusivo da Coordenação
    let response = app
        .clone()
        .oneshot(json_request_auth(
            "PUT",
            &format!("/schedules/{}", id),
            &preceptor_token,
            json!({ "max_capacity": 10 }),
        ))
        .await
        .expect("resposta");
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let response = app
        .clone()
        .oneshot(json_request_auth(
            "DELETE",
            &format!("/schedules/{}", id),
            &preceptor_token,
            json!({}),
        ))
        .await
        .expect("resposta");
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn aluno_criado_deriva_access_code_do_rgm() {
    let app = test_router().await;
    let (user_id, token) = criar_usuario_e_logar(&app, "coord3@example.com", "Coordenacao").await;

    let student = criar_aluno(&app, &token, "123456789", "aluno1@example.com").await;
    assert_eq!(student["access_code"], "6789");
    assert_eq!(student["created_by_user_id"], user_id);
    assert_eq!(student["updated_by_user_id"], user_id);

    // RGM duplicado: 409
    let response = app
        .clone()
        .oneshot(json_request_auth(
            "POST",
            "/students",
            &token,
            json!({
                "name": "Outro Aluno",
                "email": "aluno2@example.com",
                "rgm": "123456789",
                "current_semester": "8 Semestre",
            }),
        ))
        .await
        .expect("resposta");
    assert_eq!(response.status(), StatusCode::CONFLICT);

    // RGM numérico no JSON é coagido para string
    let response = app
        .clone()
        .oneshot(json_request_auth(
            "POST",
            "/students",
            &token,
            json!({
                "name": "Aluna Numérica",
                "email": "aluno3@example.com",
                "rgm": 987654321,
                "current_semester": "7/8 Semestre",
            }),
        ))
        .await
        .expect("resposta");
    assert_eq!(response.status(), StatusCode::CREATED);
    let student = body_json(response).await;
    assert_eq!(student["rgm"], "987654321");
    assert_eq!(student["access_code"], "4321");
}

#[tokio::test]
async fn login_de_aluno_por_rgm_e_access_code() {
    let app = test_router().await;
    let (_, token) = criar_usuario_e_logar(&app, "coord4@example.com", "Coordenacao").await;
    criar_aluno(&app, &token, "20250001", "aluno4@example.com").await;

    // Código errado: 401
    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/students/login",
            json!({ "rgm": "20250001", "access_code": "9999" }),
        ))
        .await
        .expect("resposta");
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    // Código certo (4 últimos caracteres do RGM): devolve o aluno
    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/students/login",
            json!({ "rgm": "20250001", "access_code": "0001" }),
        ))
        .await
        .expect("resposta");
    assert_eq!(response.status(), StatusCode::OK);
    let student = body_json(response).await;
    assert_eq!(student["rgm"], "20250001");
}

#[tokio::test]
async fn atualizacao_parcial_preserva_os_outros_campos() {
    let app = test_router().await;
    let (_, token) = criar_usuario_e_logar(&app, "coord5@example.com", "Coordenacao").await;

    let student = criar_aluno(&app, &token, "555566667777", "aluno5@example.com").await;
    let id = student["id"].as_i64().expect("id");

    let response = app
        .clone()
        .oneshot(json_request_auth(
            "PUT",
            &format!("/students/{}", id),
            &token,
            json!({ "name": "Nome Novo" }),
        ))
        .await
        .expect("resposta");
    assert_eq!(response.status(), StatusCode::OK);
    let updated = body_json(response).await;
    assert_eq!(updated["name"], "Nome Novo");
    assert_eq!(updated["email"], "aluno5@example.com");
    assert_eq!(updated["rgm"], "555566667777");
    assert_eq!(updated["access_code"], "7777");

    // RGM novo recalcula o access_code
    let response = app
        .clone()
        .oneshot(json_request_auth(
            "PUT",
            &format!("/students/{}", id),
            &token,
            json!({ "rgm": "888800001111" }),
        ))
        .await
        .expect("resposta");
    assert_eq!(response.status(), StatusCode::OK);
    let updated = body_json(response).await;
    assert_eq!(updated["access_code"], "1111");
    assert_eq!(updated["name"], "Nome Novo");

    // Corpo sem nenhum campo: 400
    let response = app
        .clone()
        .oneshot(json_request_auth(
            "PUT",
            &format!("/students/{}", id),
            &token,
            json!({}),
        ))
        .await
        .expect("resposta");
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn remover_id_inexistente_devolve_404() {
    let app = test_router().await;
    let (_, token) = criar_usuario_e_logar(&app, "coord6@example.com", "Coordenacao").await;

    let response = app
        .clone()
        .oneshot(json_request_auth("DELETE", "/students/9999", &token, json!({})))
        .await
        .expect("resposta");
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = app
        .clone()
        .oneshot(json_request_auth("DELETE", "/schedules/9999", &token, json!({})))
        .await
        .expect("resposta");
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn fluxo_completo_de_reposicao() {
    let app = test_router().await;
    let (user_id, token) = criar_usuario_e_logar(&app, "coord7@example.com", "Coordenacao").await;

    let student = criar_aluno(&app, &token, "20259999", "aluno7@example.com").await;
    let student_id = student["id"].as_i64().expect("id do aluno");

    let response = app
        .clone()
        .oneshot(json_request_auth(
            "POST",
            "/schedules",
            &token,
            json!({ "schedule_date": "2026-05-20", "shift": "Noite" }),
        ))
        .await
        .expect("resposta");
    assert_eq!(response.status(), StatusCode::CREATED);
    let schedule = body_json(response).await;
    let schedule_id = schedule["id"].as_i64().expect("id do agendamento");

    // Campos obrigatórios ausentes: 400
    let response = app
        .clone()
        .oneshot(json_request_auth(
            "POST",
            "/replacement",
            &token,
            json!({ "student_id": student_id }),
        ))
        .await
        .expect("resposta");
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    // Criação completa
    let response = app
        .clone()
        .oneshot(json_request_auth(
            "POST",
            "/replacement",
            &token,
            json!({
                "student_id": student_id,
                "schedule_id": schedule_id,
                "justification": "Atestado",
                "schedule_at": "2026-05-20T19:00:00",
            }),
        ))
        .await
        .expect("resposta");
    assert_eq!(response.status(), StatusCode::CREATED);
    let replacement = body_json(response).await;
    let replacement_id = replacement["id"].as_i64().expect("id da reposição");
    assert_eq!(replacement["preceptor_add_by"], user_id);
    assert_eq!(replacement["is_present"], false);

    // Listagem devolve a projeção fixa (sem student_id/schedule_id)
    let response = app
        .clone()
        .oneshot(json_request("GET", "/replacement", json!({})))
        .await
        .expect("resposta");
    assert_eq!(response.status(), StatusCode::OK);
    let list = body_json(response).await;
    let first = &list.as_array().expect("lista")[0];
    assert_eq!(first["justification"], "Atestado");
    assert!(first.get("student_id").is_none());

    // Atualização parcial só muda o campo enviado
    let response = app
        .clone()
        .oneshot(json_request_auth(
            "PUT",
            &format!("/replacement/{}", replacement_id),
            &token,
            json!({ "is_present": true }),
        ))
        .await
        .expect("resposta");
    assert_eq!(response.status(), StatusCode::OK);
    let updated = body_json(response).await;
    assert_eq!(updated["is_present"], true);
    assert_eq!(updated["student_id"], student_id);

    // Remoção e leitura posterior
    let response = app
        .clone()
        .oneshot(json_request_auth(
            "DELETE",
            &format!("/replacement/{}", replacement_id),
            &token,
            json!({}),
        ))
        .await
        .expect("resposta");
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .clone()
        .oneshot(json_request(
            "GET",
            &format!("/replacement/{}", replacement_id),
            json!({}),
        ))
        .await
        .expect("resposta");
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn token_adulterado_e_recusado() {
    let app = test_router().await;
    criar_usuario_e_logar(&app, "coord8@example.com", "Coordenacao").await;

    let response = app
        .clone()
        .oneshot(json_request_auth(
            "POST",
            "/schedules",
            "um.token.qualquer",
            json!({ "schedule_date": "2026-06-01", "shift": "Manhã" }),
        ))
        .await
        .expect("resposta");
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}
