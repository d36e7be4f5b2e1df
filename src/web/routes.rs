// src/web/routes.rs
use crate::{
    state::AppState,
    web::{
        mw_auth, mw_role, replacement_handlers, schedule_handlers, student_handlers,
        user_handlers,
    },
};
use axum::{
    middleware,
    routing::{get, post, put},
    Router,
};

pub fn create_router(app_state: AppState) -> Router {
    // A ordem das camadas importa: require_auth é aplicada por último em
    // cada rota, logo executa primeiro e põe o AuthUser nas extensões
    // antes da verificação de posição.

    // --- Rotas de usuários ---
    // Criação e login são públicos; leitura, alteração e remoção exigem
    // token.
    let user_routes = Router::new()
        .route(
            "/",
            post(user_handlers::handle_create_user).merge(
                get(user_handlers::handle_list_users).layer(middleware::from_fn_with_state(
                    app_state.clone(),
                    mw_auth::require_auth,
                )),
            ),
        )
        .route("/login", post(user_handlers::handle_login))
        .route(
            "/{id}",
            get(user_handlers::handle_get_user)
                .put(user_handlers::handle_update_user)
                .delete(user_handlers::handle_delete_user)
                .layer(middleware::from_fn_with_state(
                    app_state.clone(),
                    mw_auth::require_auth,
                )),
        );

    // --- Rotas de alunos ---
    // Leituras e login do aluno são públicos; mutações exigem token +
    // Coordenação ou Preceptor.
    let student_routes = Router::new()
        .route(
            "/",
            get(student_handlers::handle_list_students).merge(
                post(student_handlers::handle_create_student)
                    .layer(middleware::from_fn(mw_role::require_staff))
                    .layer(middleware::from_fn_with_state(
                        app_state.clone(),
                        mw_auth::require_auth,
                    )),
            ),
        )
        .route("/login", post(student_handlers::handle_student_login))
        .route(
            "/{id}",
            get(student_handlers::handle_get_student).merge(
                put(student_handlers::handle_update_student)
                    .delete(student_handlers::handle_delete_student)
                    .layer(middleware::from_fn(mw_role::require_staff))
                    .layer(middleware::from_fn_with_state(
                        app_state.clone(),
                        mw_auth::require_auth,
                    )),
            ),
        );

    // --- Rotas de agendamentos ---
    // Criação: Coordenação ou Preceptor; alteração e remoção: só
    // Coordenação.
    let schedule_routes = Router::new()
        .route(
            "/",
            get(schedule_handlers::handle_list_schedules).merge(
                post(schedule_handlers::handle_create_schedule)
                    .layer(middleware::from_fn(mw_role::require_staff))
                    .layer(middleware::from_fn_with_state(
                        app_state.clone(),
                        mw_auth::require_auth,
                    )),
            ),
        )
        .route(
            "/{id}",
            get(schedule_handlers::handle_get_schedule).merge(
                put(schedule_handlers::handle_update_schedule)
                    .delete(schedule_handlers::handle_delete_schedule)
                    .layer(middleware::from_fn(mw_role::require_coordenacao))
                    .layer(middleware::from_fn_with_state(
                        app_state.clone(),
                        mw_auth::require_auth,
                    )),
            ),
        );

    // --- Rotas de reposições ---
    // O router fica montado no prefixo singular /replacement.
    let replacement_routes = Router::new()
        .route(
            "/",
            get(replacement_handlers::handle_list_replacements).merge(
                post(replacement_handlers::handle_create_replacement)
                    .layer(middleware::from_fn(mw_role::require_staff))
                    .layer(middleware::from_fn_with_state(
                        app_state.clone(),
                        mw_auth::require_auth,
                    )),
            ),
        )
        .route(
            "/{id}",
            get(replacement_handlers::handle_get_replacement).merge(
                put(replacement_handlers::handle_update_replacement)
                    .delete(replacement_handlers::handle_delete_replacement)
                    .layer(middleware::from_fn(mw_role::require_staff))
                    .layer(middleware::from_fn_with_state(
                        app_state.clone(),
                        mw_auth::require_auth,
                    )),
            ),
        );

    Router::new()
        .nest("/users", user_routes)
        .nest("/students", student_routes)
        .nest("/schedules", schedule_routes)
        .nest("/replacement", replacement_routes)
        .with_state(app_state)
}
