//! Middleware, continuation, chain short-circuiting, and context seeding.

use http::{Extensions, Method, StatusCode};
use routen::testing::{CountingHandler, body_str, request, text};
use routen::{Chain, Context, Flow, Request, Router};
use std::sync::{Arc, Mutex};

type Calls = Arc<Mutex<Vec<&'static str>>>;
type BoxedFlow = std::pin::Pin<Box<dyn Future<Output = routen::HandlerOutput> + Send>>;

/// A pass-through handler that records `label` on every invocation.
fn track(
    label: &'static str,
    calls: &Calls,
) -> impl Fn(Arc<Request>, Arc<Context>) -> BoxedFlow + Send + Sync + 'static {
    let calls = Arc::clone(calls);
    move |_req, _ctx| {
        let calls = Arc::clone(&calls);
        Box::pin(async move {
            calls.lock().unwrap().push(label);
            Ok(Flow::Continue)
        })
    }
}

#[tokio::test]
async fn test_first_response_short_circuits_the_chain() {
    let second = CountingHandler::new();
    let mut builder = Router::builder();
    builder.get(
        "/one",
        Chain::new(|_req: Arc<Request>, _ctx: Arc<Context>| async move {
            Ok(Flow::Respond(text(200, "one")))
        })
        .then(second.clone()),
    );
    let router = builder.build().unwrap();

    let response = router.dispatch(request(Method::GET, "/one")).await.unwrap();
    assert_eq!(body_str(&response), "one");
    assert_eq!(second.count(), 0);
}

#[tokio::test]
async fn test_terminal_404_propagates_through_middleware() {
    let mut builder = Router::builder();
    builder
        .middleware("/**", |_req: Arc<Request>, ctx: Arc<Context>| async move {
            let response = ctx.next().await?;
            Ok(Flow::Respond(response))
        })
        .get("/a", |_req: Arc<Request>, ctx: Arc<Context>| async move {
            // Fall through with no further match.
            let response = ctx.next().await?;
            Ok(Flow::Respond(response))
        });
    let router = builder.build().unwrap();

    let response = router.dispatch(request(Method::GET, "/a")).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_str(&response), "Cannot GET /a");
}

#[tokio::test]
async fn test_middleware_wraps_each_request_once() {
    let calls: Calls = Arc::new(Mutex::new(Vec::new()));
    let calls_mw = Arc::clone(&calls);

    let mut builder = Router::builder();
    builder
        .middleware("/**", move |_req: Arc<Request>, ctx: Arc<Context>| {
            let calls = Arc::clone(&calls_mw);
            async move {
                calls.lock().unwrap().push("mw-pre");
                let response = ctx.next().await?;
                calls.lock().unwrap().push("mw-post");
                Ok(Flow::Respond(response))
            }
        })
        .get("/a", |_req: Arc<Request>, ctx: Arc<Context>| async move {
            let response = ctx.next().await?;
            Ok(Flow::Respond(response))
        })
        .get("/b", |_req: Arc<Request>, _ctx: Arc<Context>| async move {
            Ok(Flow::Respond(text(200, "b")))
        })
        .all("/**", |_req: Arc<Request>, _ctx: Arc<Context>| async move {
            Ok(Flow::Respond(text(200, "catch")))
        });
    let router = builder.build().unwrap();

    let response = router.dispatch(request(Method::GET, "/a")).await.unwrap();
    assert_eq!(body_str(&response), "catch");
    let response = router.dispatch(request(Method::GET, "/b")).await.unwrap();
    assert_eq!(body_str(&response), "b");

    let seen = calls.lock().unwrap().clone();
    assert_eq!(seen, vec!["mw-pre", "mw-post", "mw-pre", "mw-post"]);
}

#[tokio::test]
async fn test_bucket_order_ignores_registration_interleaving() {
    let calls: Calls = Arc::new(Mutex::new(Vec::new()));

    let mut builder = Router::builder();
    // Lowest-priority bucket registered first.
    builder
        .all("/**", track("all", &calls))
        .get("/x", track("get", &calls))
        .middleware("/**", track("mw", &calls));
    let router = builder.build().unwrap();

    let response = router.dispatch(request(Method::GET, "/x")).await.unwrap();
    // Everything passed through, so the walk ends at the terminal 404.
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let seen = calls.lock().unwrap().clone();
    assert_eq!(seen, vec!["mw", "get", "all"]);
}

#[tokio::test]
async fn test_middleware_sees_non_matching_methods() {
    let calls: Calls = Arc::new(Mutex::new(Vec::new()));

    let mut builder = Router::builder();
    builder
        .middleware("/**", track("mw", &calls))
        .get("/x", |_req: Arc<Request>, _ctx: Arc<Context>| async move {
            Ok(Flow::Respond(text(200, "get")))
        });
    let router = builder.build().unwrap();

    let response = router.dispatch(request(Method::POST, "/x")).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(calls.lock().unwrap().clone(), vec!["mw"]);
}

#[tokio::test]
async fn test_override_lets_a_later_chain_member_replace_it() {
    let mut builder = Router::builder();
    builder.get(
        "/two",
        Chain::new(|_req: Arc<Request>, _ctx: Arc<Context>| async move {
            Ok(Flow::Override(Some(text(200, "two"))))
        })
        .then(|_req: Arc<Request>, _ctx: Arc<Context>| async move {
            Ok(Flow::Override(Some(text(200, "__two__"))))
        }),
    );
    let router = builder.build().unwrap();

    let response = router.dispatch(request(Method::GET, "/two")).await.unwrap();
    assert_eq!(body_str(&response), "__two__");
}

#[tokio::test]
async fn test_cleared_override_resumes_the_walk() {
    let mut builder = Router::builder();
    builder
        .get(
            "/w",
            Chain::new(|_req: Arc<Request>, _ctx: Arc<Context>| async move {
                Ok(Flow::Override(Some(text(200, "staged"))))
            })
            .then(|_req: Arc<Request>, _ctx: Arc<Context>| async move {
                Ok(Flow::Override(None))
            }),
        )
        .all("/**", |_req: Arc<Request>, _ctx: Arc<Context>| async move {
            Ok(Flow::Respond(text(200, "fallback")))
        });
    let router = builder.build().unwrap();

    let response = router.dispatch(request(Method::GET, "/w")).await.unwrap();
    assert_eq!(body_str(&response), "fallback");
}

#[derive(Clone, Debug, PartialEq)]
struct AppName(&'static str);

#[tokio::test]
async fn test_static_context_seed_is_visible_to_handlers() {
    let mut extensions = Extensions::new();
    extensions.insert(AppName("routen"));

    let mut builder = Router::builder();
    builder.context(extensions);
    builder.get("/who", |_req: Arc<Request>, ctx: Arc<Context>| async move {
        let name = ctx
            .extensions()
            .get::<AppName>()
            .map(|app| app.0)
            .unwrap_or("?");
        Ok(Flow::Respond(text(200, name)))
    });
    let router = builder.build().unwrap();

    let response = router.dispatch(request(Method::GET, "/who")).await.unwrap();
    assert_eq!(body_str(&response), "routen");
}

#[derive(Clone, Debug, PartialEq)]
struct Serial(usize);

#[tokio::test]
async fn test_factory_seed_runs_per_request() {
    use std::sync::atomic::{AtomicUsize, Ordering};

    let counter = Arc::new(AtomicUsize::new(0));
    let factory_counter = Arc::clone(&counter);

    let mut builder = Router::builder();
    builder.context_with(move |_req| {
        let counter = Arc::clone(&factory_counter);
        async move {
            let serial = counter.fetch_add(1, Ordering::SeqCst) + 1;
            let mut extensions = Extensions::new();
            extensions.insert(Serial(serial));
            Ok(extensions)
        }
    });
    builder.get("/n", |_req: Arc<Request>, ctx: Arc<Context>| async move {
        let serial = ctx.extensions().get::<Serial>().map(|s| s.0).unwrap_or(0);
        Ok(Flow::Respond(text(200, serial.to_string())))
    });
    let router = builder.build().unwrap();

    let response = router.dispatch(request(Method::GET, "/n")).await.unwrap();
    assert_eq!(body_str(&response), "1");
    let response = router.dispatch(request(Method::GET, "/n")).await.unwrap();
    assert_eq!(body_str(&response), "2");
}
