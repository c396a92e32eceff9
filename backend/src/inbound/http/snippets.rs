//! Snippet page handlers.
//!
//! ```text
//! GET  /                    Latest active snippets
//! GET  /snippet/view/{id}   One snippet
//! GET  /snippet/create      Creation form
//! POST /snippet/create      Create and redirect to the new snippet
//! ```

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, get, post, web};

use crate::domain::snippet::LATEST_SNIPPETS_LIMIT;
use crate::domain::{Error, SnippetCreateForm, SnippetId};
use crate::inbound::http::ApiResult;
use crate::inbound::http::forms::{FormFields, decode_snippet_create};
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::templates::{
    CreatePage, HomePage, SnippetView, ViewPage, render, template_data,
};
use crate::inbound::http::see_other;

/// Flash shown after a snippet is stored.
pub const SNIPPET_CREATED_FLASH: &str = "Snippet successfully created!";

/// Home page listing the most recent active snippets.
#[get("/")]
pub async fn home(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<HttpResponse> {
    let snippets = state.snippets.latest_active(LATEST_SNIPPETS_LIMIT).await?;
    let data = template_data(&state, &session).await?;
    render(
        StatusCode::OK,
        &HomePage {
            data,
            snippets: snippets.into_iter().map(SnippetView::from).collect(),
        },
    )
}

/// Show one active snippet; malformed ids are indistinguishable from missing ones.
#[get("/snippet/view/{id}")]
pub async fn snippet_view(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let id: SnippetId = path
        .parse()
        .map_err(|err| Error::not_found(format!("no snippet at {path}: {err}")))?;
    let snippet = state.snippets.get(id).await?;
    let data = template_data(&state, &session).await?;
    render(
        StatusCode::OK,
        &ViewPage {
            data,
            snippet: SnippetView::from(snippet),
        },
    )
}

/// Empty creation form with the default expiry preselected.
#[get("/snippet/create")]
pub async fn snippet_create(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<HttpResponse> {
    let data = template_data(&state, &session).await?;
    render(
        StatusCode::OK,
        &CreatePage {
            data,
            form: SnippetCreateForm::default(),
        },
    )
}

/// Validate and store a snippet.
#[post("/snippet/create")]
pub async fn snippet_create_post(
    state: web::Data<HttpState>,
    session: SessionContext,
    body: web::Form<Vec<(String, String)>>,
) -> ApiResult<HttpResponse> {
    let mut form = decode_snippet_create(&FormFields::from_pairs(body.into_inner()))?;
    if !form.validate() {
        let data = template_data(&state, &session).await?;
        return render(StatusCode::UNPROCESSABLE_ENTITY, &CreatePage { data, form });
    }

    let id = state.snippets.insert(form.to_draft()).await?;
    session.put_flash(SNIPPET_CREATED_FLASH)?;
    Ok(see_other(&format!("/snippet/view/{id}")))
}

#[cfg(test)]
#[path = "snippets_tests.rs"]
mod tests;
