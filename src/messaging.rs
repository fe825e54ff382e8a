use crate::models::{ChatMessage, ChatSession, Sender};
use chrono::{DateTime, Duration as ChronoDuration, Utc};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use tracing::{debug, info};

/// How long the simulated landlord takes to answer
pub const REPLY_DELAY: Duration = Duration::from_secs(2);

pub const CANNED_REPLY: &str =
    "Vielen Dank für Ihre Nachricht. Wir werden uns zeitnah bei Ihnen melden.";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MessagingError {
    #[error("no conversation with id {0}")]
    UnknownChat(String),
    #[error("message is empty")]
    EmptyMessage,
}

/// All conversations of the signed-in user.
///
/// Cloning is cheap; clones share the same conversations, which is how the
/// delayed replies reach them.
#[derive(Debug, Clone)]
pub struct Inbox {
    chats: Arc<RwLock<Vec<ChatSession>>>,
    reply_delay: Duration,
}

impl Default for Inbox {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl Inbox {
    pub fn new(chats: Vec<ChatSession>) -> Self {
        Self {
            chats: Arc::new(RwLock::new(chats)),
            reply_delay: REPLY_DELAY,
        }
    }

    pub fn with_reply_delay(mut self, delay: Duration) -> Self {
        self.reply_delay = delay;
        self
    }

    pub async fn chats(&self) -> Vec<ChatSession> {
        self.chats.read().await.clone()
    }

    pub async fn chat(&self, chat_id: &str) -> Option<ChatSession> {
        self.chats.read().await.iter().find(|c| c.id == chat_id).cloned()
    }

    /// Swap out every conversation, e.g. on login or logout
    pub async fn replace(&self, chats: Vec<ChatSession>) {
        *self.chats.write().await = chats;
    }

    /// Append `text` to the conversation right away and schedule the canned
    /// reply. The returned handle completes once the reply is in.
    pub async fn send_message(&self, chat_id: &str, text: &str) -> Result<JoinHandle<()>, MessagingError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(MessagingError::EmptyMessage);
        }

        {
            let mut chats = self.chats.write().await;
            let chat = chats
                .iter_mut()
                .find(|c| c.id == chat_id)
                .ok_or_else(|| MessagingError::UnknownChat(chat_id.to_string()))?;
            chat.push(ChatMessage::new(Sender::Me, text));
        }
        debug!("message sent to chat {}", chat_id);

        let chats = Arc::clone(&self.chats);
        let delay = self.reply_delay;
        let chat_id = chat_id.to_string();
        Ok(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            let mut chats = chats.write().await;
            match chats.iter_mut().find(|c| c.id == chat_id) {
                Some(chat) => {
                    chat.push(ChatMessage::new(Sender::Other, CANNED_REPLY));
                    debug!("auto-reply added to chat {}", chat_id);
                }
                None => debug!("chat {} closed before the reply arrived", chat_id),
            }
        }))
    }

    /// Write to the landlord of a listing. Continues the existing
    /// conversation about that listing or opens a new one at the top.
    /// Returns the conversation id.
    pub async fn start_chat(
        &self,
        partner_name: &str,
        listing_title: &str,
        text: &str,
    ) -> Result<String, MessagingError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(MessagingError::EmptyMessage);
        }

        let mut chats = self.chats.write().await;
        if let Some(chat) = chats.iter_mut().find(|c| c.listing_title == listing_title) {
            chat.push(ChatMessage::new(Sender::Me, text));
            return Ok(chat.id.clone());
        }

        let mut chat = ChatSession::new(partner_name, listing_title);
        chat.push(ChatMessage::new(Sender::Me, text));
        let id = chat.id.clone();
        chats.insert(0, chat);
        info!("New conversation with {} about {}", partner_name, listing_title);
        Ok(id)
    }
}

/// Demo conversations shown after signing in
pub fn seed_conversations(now: DateTime<Utc>) -> Vec<ChatSession> {
    let ago = |ms: i64| now - ChronoDuration::milliseconds(ms);
    let demo = |id: &str, partner: &str, title: &str, unread: u32, messages: Vec<ChatMessage>| {
        let mut chat = ChatSession::new(partner, title);
        chat.id = id.to_string();
        chat.unread_count = unread;
        for message in messages {
            chat.push(message);
        }
        chat
    };

    vec![
        demo(
            "1",
            "Anna Müller",
            "Lichtdurchfluteter Altbau nahe Hohenzollernplatz",
            1,
            vec![
                ChatMessage::at(Sender::Me, "Guten Tag, ist die Wohnung noch verfügbar?", ago(86_400_000)),
                ChatMessage::at(Sender::Other, "Ja, sie ist noch frei. Wann hätten Sie Zeit?", ago(82_000_000)),
                ChatMessage::at(Sender::Other, "Der Besichtigungstermin am Dienstag passt mir gut.", ago(3_600_000)),
            ],
        ),
        demo(
            "2",
            "Immobilien Schmidt",
            "Modernes 3-Zi Loft",
            0,
            vec![
                ChatMessage::at(Sender::Me, "Ich habe großes Interesse an dem Loft.", ago(172_800_000)),
                ChatMessage::at(Sender::Other, "Gerne. Bitte bringen Sie die Schufa-Auskunft mit.", ago(170_000_000)),
            ],
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn inbox() -> Inbox {
        Inbox::new(seed_conversations(Utc::now()))
    }

    #[tokio::test(start_paused = true)]
    async fn send_appends_now_and_replies_after_delay() {
        let inbox = inbox();
        let handle = inbox.send_message("1", "Passt Dienstag um 18 Uhr?").await.unwrap();

        let chat = inbox.chat("1").await.unwrap();
        assert_eq!(chat.messages.len(), 4);
        assert_eq!(chat.messages[3].sender, Sender::Me);
        assert_eq!(chat.last_message, "Passt Dienstag um 18 Uhr?");

        tokio::time::advance(REPLY_DELAY - Duration::from_millis(1)).await;
        tokio::task::yield_now().await;
        assert_eq!(inbox.chat("1").await.unwrap().messages.len(), 4);

        handle.await.unwrap();
        let chat = inbox.chat("1").await.unwrap();
        assert_eq!(chat.messages.len(), 5);
        assert_eq!(chat.messages[4].sender, Sender::Other);
        assert_eq!(chat.messages[4].text, CANNED_REPLY);
        assert_eq!(chat.last_message, CANNED_REPLY);
    }

    #[tokio::test(start_paused = true)]
    async fn each_send_gets_exactly_one_reply() {
        let inbox = inbox();
        let first = inbox.send_message("2", "Erste Frage").await.unwrap();
        let second = inbox.send_message("2", "Zweite Frage").await.unwrap();
        first.await.unwrap();
        second.await.unwrap();

        let senders: Vec<Sender> = inbox.chat("2").await.unwrap().messages[2..]
            .iter()
            .map(|m| m.sender)
            .collect();
        assert_eq!(senders, vec![Sender::Me, Sender::Me, Sender::Other, Sender::Other]);
        // the other conversation is untouched
        assert_eq!(inbox.chat("1").await.unwrap().messages.len(), 3);
    }

    #[tokio::test]
    async fn unknown_chat_and_empty_text_are_rejected() {
        let inbox = inbox();
        assert_eq!(
            inbox.send_message("99", "Hallo").await.unwrap_err(),
            MessagingError::UnknownChat("99".to_string())
        );
        assert_eq!(
            inbox.send_message("1", "   ").await.unwrap_err(),
            MessagingError::EmptyMessage
        );
        assert_eq!(inbox.chat("1").await.unwrap().messages.len(), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn reply_to_removed_chat_is_dropped() {
        let inbox = inbox();
        let handle = inbox.send_message("1", "Hallo").await.unwrap();
        inbox.replace(Vec::new()).await;
        handle.await.unwrap();
        assert!(inbox.chats().await.is_empty());
    }

    #[tokio::test]
    async fn start_chat_reuses_conversation_per_listing() {
        let inbox = inbox();
        let id = inbox
            .start_chat("Anna Müller", "Lichtdurchfluteter Altbau nahe Hohenzollernplatz", "Noch frei?")
            .await
            .unwrap();
        assert_eq!(id, "1");
        assert_eq!(inbox.chat("1").await.unwrap().messages.len(), 4);

        let new_id = inbox
            .start_chat("Dr. Peters", "Penthouse mit Alpenblick in Sendling", "Besichtigung möglich?")
            .await
            .unwrap();
        let chats = inbox.chats().await;
        assert_eq!(chats.len(), 3);
        assert_eq!(chats[0].id, new_id);
        assert_eq!(chats[0].partner_name, "Dr. Peters");
        assert_eq!(chats[0].messages.len(), 1);
        assert_eq!(chats[0].last_message, "Besichtigung möglich?");
    }

    #[test]
    fn seeded_conversations_are_chronological() {
        for chat in seed_conversations(Utc::now()) {
            assert!(chat.messages.windows(2).all(|w| w[0].timestamp <= w[1].timestamp));
            assert_eq!(chat.last_message, chat.messages.last().unwrap().text);
        }
    }

    #[test]
    fn loft_preview_is_the_full_last_message() {
        let chats = seed_conversations(Utc::now());
        let loft = chats.iter().find(|c| c.id == "2").unwrap();
        assert_eq!(loft.last_message, "Gerne. Bitte bringen Sie die Schufa-Auskunft mit.");
        assert_eq!(loft.unread_count, 0);
        assert_eq!(chats[0].unread_count, 1);
    }
}
