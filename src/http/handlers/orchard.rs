use axum::{
    Form,
    extract::{Path, Query, State, rejection::FormRejection},
    http::StatusCode,
    response::{Html, Redirect},
};
use serde::Deserialize;

use crate::{models::FruitForm, state::OrchardState, views::fruits};

#[derive(Deserialize)]
pub struct MethodOverride {
    #[serde(rename = "_method")]
    pub method: Option<String>,
}

pub async fn index_handler(
    State(state): State<OrchardState>,
) -> Result<Html<String>, (StatusCode, String)> {
    let all_fruits = state.store.list_fruits().await.map_err(|e| {
        tracing::error!("Failed to get fruits: {}", e);
        e.to_response()
    })?;

    Ok(Html(fruits::index_page(&all_fruits)))
}

pub async fn show_fruit_handler(
    State(state): State<OrchardState>,
    Path(fruit_id): Path<i32>,
) -> Result<Html<String>, (StatusCode, String)> {
    let detail = state.store.get_fruit(fruit_id).await.map_err(|e| {
        tracing::error!("Error retrieving fruit {}: {}", fruit_id, e);
        e.to_response()
    })?;

    Ok(Html(fruits::show_page(&detail)))
}

pub async fn new_fruit_handler() -> Html<String> {
    Html(fruits::new_page())
}

pub async fn create_fruit_handler(
    State(state): State<OrchardState>,
    Form(form): Form<FruitForm>,
) -> Result<Redirect, (StatusCode, String)> {
    let new_fruit = form.into_new_fruit().map_err(|e| {
        tracing::warn!("Rejected new fruit: {}", e);
        e.to_response()
    })?;

    match state.store.create_fruit(new_fruit).await {
        Ok(fruit) => {
            tracing::info!("Fruit created: {} (ID: {})", fruit.name, fruit.id);
            Ok(Redirect::to("/fruits"))
        }
        Err(err) => {
            tracing::error!("Error creating fruit: {}", err);
            Err(err.to_response())
        }
    }
}

pub async fn remove_fruit_handler(
    State(state): State<OrchardState>,
    Path(fruit_id): Path<i32>,
) -> Result<Redirect, (StatusCode, String)> {
    state.store.delete_fruit(fruit_id).await.map_err(|e| {
        tracing::error!("Error deleting fruit {}: {}", fruit_id, e);
        e.to_response()
    })?;

    Ok(Redirect::to("/fruits"))
}

pub async fn edit_fruit_form_handler(
    State(state): State<OrchardState>,
    Path(fruit_id): Path<i32>,
) -> Result<Html<String>, (StatusCode, String)> {
    let detail = state.store.get_fruit(fruit_id).await.map_err(|e| {
        tracing::error!("Error retrieving fruit {}: {}", fruit_id, e);
        e.to_response()
    })?;

    let seasons = state.store.list_seasons().await.map_err(|e| {
        tracing::error!("Failed to get seasons: {}", e);
        e.to_response()
    })?;

    Ok(Html(fruits::edit_page(&detail.fruit, &seasons)))
}

pub async fn edit_fruit_handler(
    State(state): State<OrchardState>,
    Path(fruit_id): Path<i32>,
    Form(form): Form<FruitForm>,
) -> Result<Redirect, (StatusCode, String)> {
    let changes = form.into_changes().map_err(|e| {
        tracing::warn!("Rejected changes to fruit {}: {}", fruit_id, e);
        e.to_response()
    })?;

    match state.store.update_fruit(fruit_id, changes).await {
        Ok(fruit) => {
            tracing::info!("Fruit updated: {} (ID: {})", fruit.name, fruit.id);
            Ok(Redirect::to("/fruits"))
        }
        Err(err) => {
            tracing::error!("Error updating fruit {}: {}", fruit_id, err);
            Err(err.to_response())
        }
    }
}

/// `POST /fruits/{index}?_method=PUT|DELETE`, for HTML forms that cannot
/// send those methods themselves. Only PUT needs a form body.
pub async fn method_override_handler(
    State(state): State<OrchardState>,
    Path(fruit_id): Path<i32>,
    Query(method_override): Query<MethodOverride>,
    form: Result<Form<FruitForm>, FormRejection>,
) -> Result<Redirect, (StatusCode, String)> {
    let method = method_override
        .method
        .map(|m| m.trim().to_ascii_uppercase())
        .unwrap_or_default();

    match method.as_str() {
        "PUT" | "PATCH" => {
            let form = form.map_err(|rejection| {
                tracing::warn!("Rejected form for fruit {}: {}", fruit_id, rejection);
                (rejection.status(), rejection.body_text())
            })?;
            edit_fruit_handler(State(state), Path(fruit_id), form).await
        }
        "DELETE" => remove_fruit_handler(State(state), Path(fruit_id)).await,
        _ => {
            tracing::warn!("Unsupported method override '{}' for fruit {}", method, fruit_id);
            Err((
                StatusCode::METHOD_NOT_ALLOWED,
                "Use _method=PUT or _method=DELETE".into(),
            ))
        }
    }
}
