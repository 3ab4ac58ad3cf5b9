//! Fault interception: handler errors, panics, and seed failures.

use http::{Extensions, Method, StatusCode};
use routen::testing::{CountingHandler, body_str, request, text};
use routen::{Chain, ConfigError, Context, Flow, HandlerFault, Request, RouteKind, Router};
use std::sync::{Arc, Mutex};

#[tokio::test]
async fn test_custom_interceptor_maps_the_error() {
    let mut builder = Router::builder();
    builder.on_error(|fault: &HandlerFault, _req: &Request, _ctx: &Context| {
        Some(text(500, format!("Error: {}", fault.cause())))
    });
    builder
        .scope("/error")
        .get("/one", |_req: Arc<Request>, _ctx: Arc<Context>| async move {
            Err("/error/one".into())
        });
    let router = builder.build().unwrap();

    let response = router
        .dispatch(request(Method::GET, "http://example.net/error/one"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body_str(&response).starts_with("Error: /error/one"));
}

#[tokio::test]
async fn test_default_interceptor_sends_the_generic_500() {
    let mut builder = Router::builder();
    builder.get("/boom", |_req: Arc<Request>, _ctx: Arc<Context>| async move {
        Err("boom".into())
    });
    let router = builder.build().unwrap();

    let response = router
        .dispatch(request(Method::GET, "/boom"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body_str(&response), "Internal Server Error");
}

#[tokio::test]
async fn test_interceptor_returning_none_falls_back_to_500() {
    let seen: Arc<Mutex<Option<(String, usize)>>> = Arc::new(Mutex::new(None));
    let seen_sink = Arc::clone(&seen);

    let mut builder = Router::builder();
    builder.on_error(move |fault: &HandlerFault, _req: &Request, _ctx: &Context| {
        *seen_sink.lock().unwrap() =
            Some((fault.pattern().to_owned(), fault.handler_index()));
        None
    });
    builder.get(
        "/x/:id",
        Chain::new(|_req: Arc<Request>, _ctx: Arc<Context>| async move {
            Ok(Flow::Continue)
        })
        .then(|_req: Arc<Request>, _ctx: Arc<Context>| async move {
            Err("nope".into())
        }),
    );
    let router = builder.build().unwrap();

    let response = router.dispatch(request(Method::GET, "/x/7")).await.unwrap();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body_str(&response), "Internal Server Error");

    // The fault names the handler it occurred at.
    let site = seen.lock().unwrap().clone();
    assert_eq!(site, Some(("/x/:id".to_owned(), 1)));
}

#[tokio::test]
async fn test_fault_keeps_its_site_through_middleware() {
    let seen: Arc<Mutex<Option<(RouteKind, String)>>> = Arc::new(Mutex::new(None));
    let seen_sink = Arc::clone(&seen);

    let mut builder = Router::builder();
    builder.on_error(move |fault: &HandlerFault, _req: &Request, _ctx: &Context| {
        *seen_sink.lock().unwrap() = Some((fault.kind().clone(), fault.pattern().to_owned()));
        None
    });
    builder
        .middleware("/**", |_req: Arc<Request>, ctx: Arc<Context>| async move {
            // Forwarding with `?` re-raises the inner fault untouched.
            let response = ctx.next().await?;
            Ok(Flow::Respond(response))
        })
        .get("/deep", |_req: Arc<Request>, _ctx: Arc<Context>| async move {
            Err("deep failure".into())
        });
    let router = builder.build().unwrap();

    let response = router
        .dispatch(request(Method::GET, "/deep"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let site = seen.lock().unwrap().clone();
    assert_eq!(
        site,
        Some((RouteKind::Method(Method::GET), "/deep".to_owned()))
    );
}

#[tokio::test]
async fn test_aborted_walk_skips_downstream_routes() {
    let downstream = CountingHandler::new();

    let mut builder = Router::builder();
    builder
        .get("/abort", |_req: Arc<Request>, _ctx: Arc<Context>| async move {
            Err("stop here".into())
        })
        .all("/**", downstream.clone());
    let router = builder.build().unwrap();

    let response = router
        .dispatch(request(Method::GET, "/abort"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(downstream.count(), 0);
}

#[tokio::test]
async fn test_panicking_handler_is_intercepted() {
    let mut builder = Router::builder();
    builder.get("/panic", |_req: Arc<Request>, _ctx: Arc<Context>| async move {
        panic!("handler exploded")
    });
    let router = builder.build().unwrap();

    let response = router
        .dispatch(request(Method::GET, "/panic"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body_str(&response), "Internal Server Error");
}

#[tokio::test]
async fn test_failing_seed_factory_is_a_config_fault() {
    let never_ran = CountingHandler::new();

    let mut builder = Router::builder();
    builder.context_with(|_req| async move {
        Err::<Extensions, _>("no session store".into())
    });
    builder.all("/**", never_ran.clone());
    let router = builder.build().unwrap();

    let error = router
        .dispatch(request(Method::GET, "/anything"))
        .await
        .unwrap_err();
    assert!(matches!(error, ConfigError::Seed(_)));
    // The fault fires before any route is evaluated.
    assert_eq!(never_ran.count(), 0);
}

#[tokio::test]
async fn test_middleware_may_recover_a_fault_deliberately() {
    let mut builder = Router::builder();
    builder
        .middleware("/**", |_req: Arc<Request>, ctx: Arc<Context>| async move {
            match ctx.next().await {
                Ok(response) => Ok(Flow::Respond(response)),
                Err(fault) => Ok(Flow::Respond(text(
                    503,
                    format!("recovered: {}", fault.cause()),
                ))),
            }
        })
        .get("/flaky", |_req: Arc<Request>, _ctx: Arc<Context>| async move {
            Err("transient".into())
        });
    let router = builder.build().unwrap();

    let response = router
        .dispatch(request(Method::GET, "/flaky"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body_str(&response), "recovered: transient");
}
