use advisor_core::{
    lambda_handler, DispatchError, HandlerError, IntentRouter, InvocationContext,
    NumericParsePolicy, Validator,
};
use serde_json::{json, Value};

fn event(source: &str, slots: Value) -> Value {
    json!({
        "messageVersion": "1.0",
        "userId": "scenario-user",
        "currentIntent": { "name": "RecommendPortfolio", "slots": slots, "confirmationStatus": "None" },
        "invocationSource": source,
        "sessionAttributes": { "turn": "3" }
    })
}

fn invoke(event: Value) -> Result<Value, HandlerError> {
    lambda_handler(event, &InvocationContext::new("scenario"), &IntentRouter::default())
}

#[test]
fn valid_dialog_turn_delegates_with_unchanged_slots() {
    let slots = json!({ "firstName": "Jo", "age": "30", "investmentAmount": "10000", "riskLevel": "Mid" });
    let response = invoke(event("DialogCodeHook", slots.clone())).expect("dialog turn");

    assert_eq!(response["dialogAction"]["type"], "Delegate");
    assert_eq!(response["dialogAction"]["slots"], slots);
    assert_eq!(response["sessionAttributes"], json!({ "turn": "3" }));
}

#[test]
fn partially_collected_dialog_turn_delegates() {
    let slots = json!({ "firstName": "Jo", "age": null, "investmentAmount": null, "riskLevel": null });
    let response = invoke(event("DialogCodeHook", slots.clone())).expect("dialog turn");

    assert_eq!(response["dialogAction"]["type"], "Delegate");
    assert_eq!(response["dialogAction"]["slots"], slots);
}

#[test]
fn low_investment_amount_is_elicited_again() {
    let response = invoke(event(
        "DialogCodeHook",
        json!({ "firstName": "Jo", "age": "30", "investmentAmount": "3000", "riskLevel": null }),
    ))
    .expect("dialog turn");

    let action = &response["dialogAction"];
    assert_eq!(action["type"], "ElicitSlot");
    assert_eq!(action["intentName"], "RecommendPortfolio");
    assert_eq!(action["slotToElicit"], "investmentAmount");
    assert_eq!(action["slots"]["investmentAmount"], Value::Null);
    assert_eq!(action["slots"]["age"], "30");
    assert_eq!(action["message"]["contentType"], "PlainText");
    assert_eq!(response["sessionAttributes"], json!({ "turn": "3" }));
}

#[test]
fn only_the_first_violation_is_elicited() {
    let response = invoke(event(
        "DialogCodeHook",
        json!({ "firstName": "", "age": "200", "investmentAmount": "1", "riskLevel": "Extreme" }),
    ))
    .expect("dialog turn");

    let action = &response["dialogAction"];
    assert_eq!(action["slotToElicit"], "firstName");
    assert_eq!(action["slots"]["firstName"], Value::Null);
    assert_eq!(action["slots"]["age"], "200");
    assert_eq!(action["slots"]["riskLevel"], "Extreme");
}

#[test]
fn out_of_range_age_is_elicited_again() {
    for age in ["0", "65", "120"] {
        let response = invoke(event("DialogCodeHook", json!({ "firstName": "Jo", "age": age })))
            .expect("dialog turn");
        assert_eq!(response["dialogAction"]["slotToElicit"], "age", "age {age}");
    }
}

#[test]
fn fulfillment_closes_with_named_recommendation() {
    let response = invoke(event(
        "FulfillmentCodeHook",
        json!({ "firstName": "Jo", "age": "30", "investmentAmount": "10000", "riskLevel": "High" }),
    ))
    .expect("fulfillment");

    let action = &response["dialogAction"];
    assert_eq!(action["type"], "Close");
    assert_eq!(action["fulfillmentState"], "Fulfilled");
    let content = action["message"]["content"].as_str().unwrap_or_default();
    assert!(content.contains("Jo"));
    assert!(content.contains("20% bonds (AGG), 80% equities (SPY)"));
}

#[test]
fn fulfillment_for_each_mapped_level() {
    let expected = [
        ("None", "100% bonds (AGG), 0% equities (SPY)"),
        ("Very Low", "80% bonds (AGG), 20% equities (SPY)"),
        ("Low", "60% bonds (AGG), 40% equities (SPY)"),
        ("Mid", "40% bonds (AGG), 60% equities (SPY)"),
        ("High", "20% bonds (AGG), 80% equities (SPY)"),
        ("Very High", "0% bonds (AGG), 100% equities (SPY)"),
    ];

    for (level, allocation) in expected {
        let response = invoke(event(
            "FulfillmentCodeHook",
            json!({ "firstName": "Sam", "riskLevel": level }),
        ))
        .expect("fulfillment");
        let content = response["dialogAction"]["message"]["content"].as_str().unwrap_or_default();
        assert!(content.ends_with(allocation), "{level}: {content}");
    }
}

#[test]
fn fulfillment_of_maximum_risk_is_fatal() {
    let error = invoke(event("FulfillmentCodeHook", json!({ "firstName": "Jo", "riskLevel": "Maximum" })))
        .expect_err("no allocation for Maximum");

    assert_eq!(error.error_class(), "unmapped_risk_level");
}

#[test]
fn unknown_intent_terminates_the_invocation() {
    let error = invoke(json!({
        "currentIntent": { "name": "Unknown", "slots": {} },
        "invocationSource": "DialogCodeHook",
        "sessionAttributes": {}
    }))
    .expect_err("unsupported intent");

    assert_eq!(
        error,
        HandlerError::Dispatch(DispatchError::UnsupportedIntent { intent_name: "Unknown".to_owned() })
    );
}

#[test]
fn numeric_policy_decides_unreadable_age() {
    let turn = event("DialogCodeHook", json!({ "firstName": "Jo", "age": "thirty" }));

    let strict = lambda_handler(
        turn.clone(),
        &InvocationContext::new("strict"),
        &IntentRouter::new(Validator::new(NumericParsePolicy::Strict)),
    )
    .expect("strict turn");
    assert_eq!(strict["dialogAction"]["slotToElicit"], "age");

    let lenient = lambda_handler(
        turn,
        &InvocationContext::new("lenient"),
        &IntentRouter::new(Validator::new(NumericParsePolicy::Lenient)),
    )
    .expect("lenient turn");
    assert_eq!(lenient["dialogAction"]["type"], "Delegate");
}

#[test]
fn opaque_session_attributes_are_echoed_back() {
    let attributes = json!({ "visits": 2, "ctx": { "a": true }, "channel": "web" });

    let delegated = invoke(json!({
        "currentIntent": { "name": "RecommendPortfolio", "slots": { "firstName": "Jo" } },
        "invocationSource": "DialogCodeHook",
        "sessionAttributes": attributes.clone()
    }))
    .expect("dialog turn");
    assert_eq!(delegated["sessionAttributes"], attributes);

    let elicited = invoke(json!({
        "currentIntent": { "name": "RecommendPortfolio", "slots": { "age": "0" } },
        "invocationSource": "DialogCodeHook",
        "sessionAttributes": attributes.clone()
    }))
    .expect("dialog turn");
    assert_eq!(elicited["dialogAction"]["type"], "ElicitSlot");
    assert_eq!(elicited["sessionAttributes"], attributes);

    let closed = invoke(json!({
        "currentIntent": { "name": "RecommendPortfolio", "slots": { "firstName": "Jo", "riskLevel": "Mid" } },
        "invocationSource": "FulfillmentCodeHook",
        "sessionAttributes": attributes.clone()
    }))
    .expect("fulfillment");
    assert_eq!(closed["sessionAttributes"], attributes);
}

#[test]
fn null_slot_bag_is_delegated_as_null() {
    let response = invoke(json!({
        "currentIntent": { "name": "RecommendPortfolio", "slots": null },
        "invocationSource": "DialogCodeHook",
        "sessionAttributes": null
    }))
    .expect("dialog turn");

    assert_eq!(
        response,
        json!({ "sessionAttributes": null, "dialogAction": { "type": "Delegate", "slots": null } })
    );
}
