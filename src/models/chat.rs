use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Who wrote a chat message
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    Me,
    Other,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChatMessage {
    pub id: String,
    pub sender: Sender,
    pub text: String,
    pub timestamp: DateTime<Utc>,
}

impl ChatMessage {
    pub fn new(sender: Sender, text: impl Into<String>) -> Self {
        Self::at(sender, text, Utc::now())
    }

    pub fn at(sender: Sender, text: impl Into<String>, timestamp: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            sender,
            text: text.into(),
            timestamp,
        }
    }
}

/// A conversation with a landlord about one listing
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ChatSession {
    pub id: String,
    pub partner_name: String,
    #[serde(rename = "apartmentTitle")]
    pub listing_title: String,
    pub last_message: String,
    pub unread_count: u32,
    pub messages: Vec<ChatMessage>,
}

impl ChatSession {
    pub fn new(partner_name: impl Into<String>, listing_title: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            partner_name: partner_name.into(),
            listing_title: listing_title.into(),
            last_message: String::new(),
            unread_count: 0,
            messages: Vec::new(),
        }
    }

    /// Append a message and make it the conversation preview.
    pub fn push(&mut self, message: ChatMessage) {
        self.last_message.clone_from(&message.text);
        self.messages.push(message);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn session_uses_client_field_names() {
        let mut chat = ChatSession::new("Anna Müller", "Modernes 3-Zi Loft");
        chat.push(ChatMessage::new(Sender::Me, "Hallo"));

        let value = serde_json::to_value(&chat).unwrap();
        assert_eq!(value["apartmentTitle"], "Modernes 3-Zi Loft");
        assert_eq!(value["partnerName"], "Anna Müller");
        assert_eq!(value["lastMessage"], "Hallo");
        assert_eq!(value["messages"][0]["sender"], "me");
        assert!(value.get("listingTitle").is_none());
    }

    #[test]
    fn session_reads_client_json() {
        let chat: ChatSession = serde_json::from_value(json!({
            "id": "2",
            "partnerName": "Immobilien Schmidt",
            "apartmentTitle": "Modernes 3-Zi Loft",
            "lastMessage": "",
            "unreadCount": 0,
            "messages": []
        }))
        .unwrap();
        assert_eq!(chat.listing_title, "Modernes 3-Zi Loft");
    }
}
