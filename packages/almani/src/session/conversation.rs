//! 对话回放
//!
//! 逐句回放固定的对话脚本。第一句作为对方台词直接显示；之后每次用户“说话”：
//! 等待录音延迟和回复延迟，再追加下一句作为用户台词、再下一句作为对方台词并
//! 朗读，直到脚本结束。
//!
//! 回放状态随页面创建和丢弃，不持久化。丢弃 `user_turn` 返回的 future 即取消本轮，
//! 回放保持在本轮开始前的状态。

use std::time::Duration;

use crate::models::{Conversation, ConversationLine};
use crate::platform::tts::{speak_or_ignore, Speaker, GERMAN};

/// 默认录音模拟延迟
pub const DEFAULT_RECORD_DELAY: Duration = Duration::from_millis(1500);
/// 默认对方回复延迟
pub const DEFAULT_REPLY_DELAY: Duration = Duration::from_millis(1000);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sender {
    Bot,
    User,
}

/// 对话记录中的一条消息
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub sender: Sender,
    pub text: String,
    pub translation: String,
}

impl Message {
    fn from_line(sender: Sender, line: &ConversationLine) -> Self {
        Self {
            sender,
            text: line.text.clone(),
            translation: line.translation.clone(),
        }
    }
}

/// 回放延迟
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlaybackTiming {
    pub record_delay: Duration,
    pub reply_delay: Duration,
}

impl Default for PlaybackTiming {
    fn default() -> Self {
        Self {
            record_delay: DEFAULT_RECORD_DELAY,
            reply_delay: DEFAULT_REPLY_DELAY,
        }
    }
}

impl PlaybackTiming {
    /// 不等待，用于脚本化回放
    pub fn instant() -> Self {
        Self {
            record_delay: Duration::ZERO,
            reply_delay: Duration::ZERO,
        }
    }
}

/// 一轮用户发言的结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnOutcome {
    /// 追加了用户台词和对方回复
    Replied,
    /// 只追加了用户台词（脚本已到末尾）
    UserOnly,
    /// 脚本已结束，未做任何事
    Finished,
}

pub struct ConversationPlayback<'a> {
    conversation: &'a Conversation,
    messages: Vec<Message>,
    step: usize,
    recording: bool,
}

impl<'a> ConversationPlayback<'a> {
    pub fn new(conversation: &'a Conversation) -> Self {
        let messages = conversation
            .dialogue
            .first()
            .map(|line| vec![Message::from_line(Sender::Bot, line)])
            .unwrap_or_default();

        Self {
            conversation,
            messages,
            step: 0,
            recording: false,
        }
    }

    pub fn title(&self) -> &str {
        &self.conversation.title
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn step(&self) -> usize {
        self.step
    }

    pub fn is_recording(&self) -> bool {
        self.recording
    }

    /// 是否还能继续发言
    pub fn can_advance(&self) -> bool {
        self.step + 1 < self.conversation.dialogue.len()
    }

    /// 执行一轮用户发言，按 `timing` 等待
    ///
    /// 两段延迟都结束后才一次性追加用户台词和对方回复，中途丢弃 future
    /// 不会留下半轮状态。
    pub async fn user_turn<S>(&mut self, timing: PlaybackTiming, speaker: &S) -> TurnOutcome
    where
        S: Speaker + ?Sized,
    {
        if !self.can_advance() {
            return TurnOutcome::Finished;
        }

        {
            let _recording = RecordingFlag::raise(&mut self.recording);
            tokio::time::sleep(timing.record_delay).await;
        }

        if self.has_reply() {
            tokio::time::sleep(timing.reply_delay).await;
        }
        self.finish_turn(speaker)
    }

    /// 不等待地执行一轮用户发言
    pub fn advance<S>(&mut self, speaker: &S) -> TurnOutcome
    where
        S: Speaker + ?Sized,
    {
        if !self.can_advance() {
            return TurnOutcome::Finished;
        }
        self.finish_turn(speaker)
    }

    fn has_reply(&self) -> bool {
        self.step + 2 < self.conversation.dialogue.len()
    }

    fn finish_turn<S>(&mut self, speaker: &S) -> TurnOutcome
    where
        S: Speaker + ?Sized,
    {
        let next = self.step + 1;
        let user_line = &self.conversation.dialogue[next];
        self.messages.push(Message::from_line(Sender::User, user_line));

        let reply = next + 1;
        let Some(line) = self.conversation.dialogue.get(reply) else {
            self.step = next;
            return TurnOutcome::UserOnly;
        };

        self.messages.push(Message::from_line(Sender::Bot, line));
        speak_or_ignore(speaker, &line.text, GERMAN);
        self.step = reply;
        TurnOutcome::Replied
    }
}

/// 录音标记，离开作用域（包括 future 被丢弃）时自动清除
struct RecordingFlag<'a>(&'a mut bool);

impl<'a> RecordingFlag<'a> {
    fn raise(flag: &'a mut bool) -> Self {
        *flag = true;
        Self(flag)
    }
}

impl Drop for RecordingFlag<'_> {
    fn drop(&mut self) {
        *self.0 = false;
    }
}
