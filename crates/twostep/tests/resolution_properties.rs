//! Property tests for layout resolution.
//!
//! Each property runs the resolver against a recording mock engine and checks
//! what was rendered, what was returned and what reached the sink.

use proptest::prelude::*;
use serde_json::Value;
use twostep::mock::{MockConfig, MockEngine, RenderCall};
use twostep::{LayoutDirective, LayoutResolver, OutputBuffer, RenderRequest, ViewData, BODY_KEY};

const VIEW: &str = "content";
const LAYOUT: &str = "layout";

fn view_data() -> impl Strategy<Value = ViewData> {
    prop::collection::btree_map("[a-z]{1,8}", "[ -~]{0,16}", 0..6).prop_map(|entries| {
        entries
            .into_iter()
            .map(|(k, v)| (k, Value::String(v)))
            .collect()
    })
}

fn directive() -> impl Strategy<Value = LayoutDirective> {
    prop_oneof![
        Just(LayoutDirective::named(LAYOUT)),
        Just(LayoutDirective::Suppressed),
        Just(LayoutDirective::UseDefault),
    ]
}

fn engine(body: &str, layout_output: &str) -> MockEngine {
    MockEngine::new()
        .with_view(VIEW, body)
        .with_view(LAYOUT, layout_output)
}

fn with_body(data: &ViewData, body: &str) -> ViewData {
    let mut expected = data.clone();
    expected.insert(BODY_KEY.to_string(), Value::String(body.to_string()));
    expected
}

proptest! {
    #[test]
    fn suppressed_passes_through(
        body in ".{0,32}",
        data in view_data(),
        return_mode in any::<bool>(),
    ) {
        let resolver = LayoutResolver::new(engine(&body, "L"), MockConfig::named(LAYOUT));
        let mut out = OutputBuffer::new();

        let result = resolver
            .render(
                RenderRequest::new(VIEW)
                    .data(data.clone())
                    .no_layout()
                    .with_return_mode(return_mode),
                &mut out,
            )
            .unwrap();

        let expected_call = if return_mode {
            RenderCall::capture(VIEW, data)
        } else {
            RenderCall::emit(VIEW, data)
        };
        prop_assert_eq!(resolver.engine().calls(), vec![expected_call]);
        if return_mode {
            prop_assert_eq!(result, Some(body));
            prop_assert!(out.is_empty());
        } else {
            prop_assert_eq!(result, None);
            prop_assert_eq!(out.as_str(), body.as_str());
        }
    }

    #[test]
    fn explicit_layout_receives_captured_body(
        body in ".{0,32}",
        layout_output in ".{0,32}",
        data in view_data(),
        return_mode in any::<bool>(),
    ) {
        let resolver = LayoutResolver::new(engine(&body, &layout_output), MockConfig::suppressed());
        let mut out = OutputBuffer::new();

        let result = resolver
            .render(
                RenderRequest::new(VIEW)
                    .data(data.clone())
                    .layout(LAYOUT)
                    .with_return_mode(return_mode),
                &mut out,
            )
            .unwrap();

        let calls = resolver.engine().calls();
        prop_assert_eq!(calls.len(), 2);
        prop_assert_eq!(&calls[0], &RenderCall::capture(VIEW, data.clone()));
        prop_assert_eq!(&calls[1].name, LAYOUT);
        prop_assert_eq!(calls[1].capture, return_mode);
        prop_assert_eq!(&calls[1].data, &with_body(&data, &body));
        prop_assert_eq!(resolver.config().queries(), 0);

        if return_mode {
            prop_assert_eq!(result, Some(layout_output));
            prop_assert!(out.is_empty());
        } else {
            prop_assert_eq!(result, None);
            prop_assert_eq!(out.as_str(), layout_output.as_str());
        }
    }

    #[test]
    fn default_named_matches_explicit(
        body in ".{0,32}",
        data in view_data(),
        return_mode in any::<bool>(),
    ) {
        let explicit = LayoutResolver::new(engine(&body, "wrapped"), MockConfig::suppressed());
        let default = LayoutResolver::new(engine(&body, "wrapped"), MockConfig::named(LAYOUT));
        let mut explicit_out = OutputBuffer::new();
        let mut default_out = OutputBuffer::new();

        let a = explicit
            .render(
                RenderRequest::new(VIEW)
                    .data(data.clone())
                    .layout(LAYOUT)
                    .with_return_mode(return_mode),
                &mut explicit_out,
            )
            .unwrap();
        let b = default
            .render(
                RenderRequest::new(VIEW).data(data).with_return_mode(return_mode),
                &mut default_out,
            )
            .unwrap();

        prop_assert_eq!(a, b);
        prop_assert_eq!(explicit_out, default_out);
        prop_assert_eq!(explicit.engine().calls(), default.engine().calls());
        prop_assert_eq!(default.config().queries(), 1);
    }

    #[test]
    fn default_suppressed_yields_body(
        body in ".{0,32}",
        data in view_data(),
        return_mode in any::<bool>(),
    ) {
        let resolver = LayoutResolver::new(engine(&body, "L"), MockConfig::suppressed());
        let mut out = OutputBuffer::new();

        let result = resolver
            .render(
                RenderRequest::new(VIEW).data(data.clone()).with_return_mode(return_mode),
                &mut out,
            )
            .unwrap();

        prop_assert_eq!(resolver.engine().calls(), vec![RenderCall::capture(VIEW, data)]);
        if return_mode {
            prop_assert_eq!(result, Some(body));
            prop_assert!(out.is_empty());
        } else {
            prop_assert_eq!(result, None);
            prop_assert_eq!(out.as_str(), body.as_str());
        }
    }

    #[test]
    fn repeated_renders_are_identical(
        body in ".{0,32}",
        data in view_data(),
        layout in directive(),
        default_named in any::<bool>(),
        return_mode in any::<bool>(),
    ) {
        let config = if default_named {
            MockConfig::named(LAYOUT)
        } else {
            MockConfig::suppressed()
        };
        let resolver = LayoutResolver::new(engine(&body, "wrapped"), config);
        let request = RenderRequest::new(VIEW)
            .data(data)
            .layout(layout)
            .with_return_mode(return_mode);

        let mut first = OutputBuffer::new();
        let mut second = OutputBuffer::new();
        let a = resolver.render(request.clone(), &mut first).unwrap();
        let b = resolver.render(request, &mut second).unwrap();

        prop_assert_eq!(&a, &b);
        prop_assert_eq!(&first, &second);
        prop_assert_eq!(a.is_some(), return_mode);
        if return_mode {
            prop_assert!(first.is_empty());
        }
    }
}
