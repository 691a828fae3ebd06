//! Fixed persona: system prompt, seed exchange, and canned replies.
//!
//! The bot speaks refined Kyoto dialect and is strict about manners. All
//! user-visible strings live here so the rules engine stays free of
//! literals.

use std::sync::LazyLock;

use regex::Regex;

use miyabi_types::conversation::Conversation;
use miyabi_types::llm::{Message, MessageRole};

/// System prompt injected at conversation start.
pub const PERSONA_PROMPT: &str = "あなたは創造的思考の持ち主です。礼儀や作法に厳しいですが、話し方は上品な京都弁です。必ず京都人らしい皮肉や嫌味をひとつは含みつつ、問いかけにすぐに答えを出さず、ユーザの考えを整理し、ユーザが自分で解決手段を見つけられるように質問で課題を引き出し、学びを与えてくれます。";

/// Acknowledgment the bot gives to the seeded name introduction.
pub const SEED_ACKNOWLEDGMENT: &str = "分かりました。";

/// Inputs that wipe the conversation back to its seed.
pub const RESET_KEYWORDS: [&str; 3] = ["リセット", "clear", "reset"];

/// Confirmation returned after a reset.
pub const RESET_CONFIRMATION: &str = "会話をリセットしました。";

/// Reply for input that fails the politeness register.
pub const IMPOLITE_REPLY: &str = "はてな、初対面なのにすごいくだけた感じね。ちょっと驚きましたわ。敬語っていうもの、一応あるんですけど、聞いたことがないのかしら？まあ、どうでもいいんでしょうけど、気をつけたほうがいいですよ、他の人にも同じこと言ったら、ちょっと厳しい目で見られることもありますからね。";

/// Command that opts a user into the morning weather broadcast.
pub const SUBSCRIBE_COMMAND: &str = "天気通知オン";

/// Command that opts a user out of the morning weather broadcast.
pub const UNSUBSCRIBE_COMMAND: &str = "天気通知オフ";

pub const SUBSCRIBE_CONFIRMATION: &str = "天気通知を登録しました。毎朝6時の天気をお知らせしますわ。";
pub const UNSUBSCRIBE_CONFIRMATION: &str = "天気通知を解除しました。";
pub const NOTIFICATIONS_UNAVAILABLE: &str = "天気通知は現在ご利用いただけません。";

/// Polite sentence-ending forms. Input containing none of these is scolded.
pub static POLITE_FORMS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        "ます。|です。|ですか。|ますか。|しょうか。|下さい。|ませんか。|ください。|こんにちは。|今晩は。|こんばんは。",
    )
    .expect("polite-form pattern is a valid regex")
});

/// Fixed greeting replies, matched against the exact input text.
pub fn greeting_reply(text: &str) -> Option<&'static str> {
    match text {
        "こんにちは。" => {
            Some("こんにちは、お世話になります。新しいご縁に感謝しておりますわ。")
        }
        "おはようございます。" | "お早うございます。" => {
            Some("おはようございます、朝から元気なんですね。素敵な一日になりますように。。")
        }
        "こんばんは。" | "今晩は。" => Some(
            "こんばんは、お疲れ様です。何か用でもございますか？まさか、ただの挨拶だけでしょうか？",
        ),
        _ => None,
    }
}

/// Build the three-message seed for a fresh conversation.
///
/// Element 0 is always the persona system message; the name introduction
/// and its acknowledgment follow.
pub fn seed_conversation(sender: &str) -> Conversation {
    Conversation::from_messages(vec![
        Message {
            role: MessageRole::System,
            content: PERSONA_PROMPT.to_string(),
        },
        Message {
            role: MessageRole::User,
            content: format!("私の名前は{sender}です。"),
        },
        Message {
            role: MessageRole::Assistant,
            content: SEED_ACKNOWLEDGMENT.to_string(),
        },
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seed_starts_with_persona() {
        let conv = seed_conversation("Alice");
        assert_eq!(conv.len(), 3);
        assert_eq!(conv.system_prompt(), Some(PERSONA_PROMPT));
        assert_eq!(conv.messages()[1].content, "私の名前はAliceです。");
        assert_eq!(conv.messages()[2].content, SEED_ACKNOWLEDGMENT);
    }

    #[test]
    fn test_polite_forms_accept_desu_masu() {
        assert!(POLITE_FORMS.is_match("今日は良い天気です。"));
        assert!(POLITE_FORMS.is_match("教えていただけませんか。"));
        assert!(POLITE_FORMS.is_match("こんにちは。"));
    }

    #[test]
    fn test_polite_forms_reject_casual() {
        assert!(!POLITE_FORMS.is_match("おい"));
        assert!(!POLITE_FORMS.is_match("今日の天気どう"));
    }

    #[test]
    fn test_greeting_reply_exact_match_only() {
        assert!(greeting_reply("こんにちは。").is_some());
        assert!(greeting_reply("今晩は。").is_some());
        // Missing the full stop is not an exact match.
        assert!(greeting_reply("こんにちは").is_none());
        assert!(greeting_reply("こんにちは。お元気ですか。").is_none());
    }
}
