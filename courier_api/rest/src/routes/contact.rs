use std::{collections::HashMap, sync::Arc};

use axum::{
    extract::State,
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Redirect, Response},
    routing, Form, Json, Router,
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use courier_core_contact_contracts::{
    ContactFeatureService, ContactOutcome, ContactRequestContext, ContactSubmitError,
};
use courier_models::{contact::SubmissionMode, transient_state::TransientStateKey};

use super::internal_server_error;
use crate::models::contact::{ApiContactForm, ApiContactStatus};

/// Cookie holding the key of the client's transient state.
pub const STATE_COOKIE: &str = "courier_state";

type ContactState<S> = State<(Arc<S>, Arc<str>)>;

pub fn router(service: Arc<impl ContactFeatureService>, honeypot_field: Arc<str>) -> Router<()> {
    Router::new()
        .route("/contact", routing::post(submit))
        .route("/contact/status", routing::get(status))
        .with_state((service, honeypot_field))
}

async fn submit<S: ContactFeatureService>(
    State((service, honeypot_field)): ContactState<S>,
    jar: CookieJar,
    headers: HeaderMap,
    Form(form): Form<HashMap<String, String>>,
) -> Response {
    let form = ApiContactForm(form);
    let mode = if form.is_interactive() {
        SubmissionMode::Interactive
    } else {
        SubmissionMode::FormPost
    };

    let (jar, state_key) = match state_key(&jar) {
        Some(key) => (jar, key),
        None if mode == SubmissionMode::FormPost => {
            let key = TransientStateKey::generate();
            (jar.add(state_cookie(key)), key)
        }
        None => (jar, TransientStateKey::generate()),
    };

    let referer = headers
        .get(header::REFERER)
        .and_then(|referer| referer.to_str().ok())
        .map(Into::into);

    let context = ContactRequestContext {
        mode,
        state_key,
        referer,
    };

    match service
        .submit(context, form.into_submission(&honeypot_field))
        .await
    {
        Ok(ContactOutcome::Success) => Json(1).into_response(),
        Ok(ContactOutcome::Errors(messages)) => Json(messages).into_response(),
        Ok(ContactOutcome::Redirect { location }) => {
            (jar, Redirect::to(&location)).into_response()
        }
        Err(ContactSubmitError::Other(err)) => internal_server_error(err),
    }
}

async fn status<S: ContactFeatureService>(
    State((service, _)): ContactState<S>,
    jar: CookieJar,
) -> Response {
    let Some(state_key) = state_key(&jar) else {
        return StatusCode::NO_CONTENT.into_response();
    };

    match service.take_status(state_key).await {
        Ok(Some(status)) => Json(ApiContactStatus::from(status)).into_response(),
        Ok(None) => StatusCode::NO_CONTENT.into_response(),
        Err(err) => internal_server_error(err),
    }
}

fn state_key(jar: &CookieJar) -> Option<TransientStateKey> {
    jar.get(STATE_COOKIE)
        .and_then(|cookie| cookie.value().parse().ok())
}

fn state_cookie(key: TransientStateKey) -> Cookie<'static> {
    Cookie::build((STATE_COOKIE, key.to_string()))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .build()
}
