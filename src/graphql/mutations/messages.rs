use super::prelude::*;

/// The only value the validation demo accepts.
const EXPECTED_INPUT: &str = "expected";

#[derive(Default)]
pub struct MessageMutations;

#[Object]
impl MessageMutations {
    /// Validation demo: succeeds only for the expected input and echoes it
    /// back; anything else fails with a user-input error naming the
    /// offending argument.
    async fn user_input_error(&self, input: Option<String>) -> Result<Option<String>> {
        if input.as_deref() != Some(EXPECTED_INPUT) {
            return Err(errors::user_input_error("Form Arguments invalid", &["input"]));
        }
        Ok(input)
    }

    /// Publish a message to the change feed. Returns whether any subscriber
    /// was registered at publish time.
    async fn post_message(&self, ctx: &Context<'_>, message: String) -> Result<bool> {
        let bus = ctx.data_unchecked::<EventBus>();
        let had_listeners = bus.subscriber_count(topics::SOMETHING_CHANGED) > 0;
        bus.publish(topics::SOMETHING_CHANGED, serde_json::Value::String(message));
        Ok(had_listeners)
    }
}
