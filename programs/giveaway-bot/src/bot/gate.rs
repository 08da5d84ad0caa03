// bot/gate.rs
use teloxide::prelude::*;
use teloxide::types::{ChatMemberStatus, Recipient};

/// Statuses that count as "joined the channel"
pub fn status_grants_access(status: ChatMemberStatus) -> bool {
    matches!(
        status,
        ChatMemberStatus::Owner
            | ChatMemberStatus::Administrator
            | ChatMemberStatus::Member
            | ChatMemberStatus::Restricted
    )
}

/// Channel membership probe. A failed lookup counts as not joined.
pub async fn is_member(bot: &Bot, channel: &str, user: UserId) -> bool {
    match bot
        .get_chat_member(Recipient::ChannelUsername(channel.to_string()), user)
        .await
    {
        Ok(member) => status_grants_access(member.status()),
        Err(err) => {
            tracing::warn!(user = user.0, channel, %err, "membership check failed");
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn joined_statuses_pass() {
        for status in [
            ChatMemberStatus::Owner,
            ChatMemberStatus::Administrator,
            ChatMemberStatus::Member,
            ChatMemberStatus::Restricted,
        ] {
            assert!(status_grants_access(status));
        }
    }

    #[test]
    fn departed_statuses_are_denied() {
        assert!(!status_grants_access(ChatMemberStatus::Left));
        assert!(!status_grants_access(ChatMemberStatus::Banned));
    }

    #[tokio::test]
    async fn failed_lookup_denies_access() {
        let api = url::Url::parse("http://127.0.0.1:1/").unwrap();
        let bot = Bot::new("123:abc").set_api_url(api);
        assert!(!is_member(&bot, "@tzgiveaways", UserId(5)).await);
    }
}
