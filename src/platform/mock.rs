use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use serenity::all::{ChannelId, GuildId, PermissionOverwrite, UserId};

use super::{ChannelSnapshot, MemberVoiceState, Platform, PlatformError, VoiceChannelSpec};

/// Mutating call recorded by [`MockPlatform`]
#[derive(Debug, Clone)]
pub enum Call {
    CreateVoiceChannel(VoiceChannelSpec),
    CreateCategory(String),
    DeleteChannel(ChannelId),
    SetOverwrite(ChannelId, UserId, Option<PermissionOverwrite>),
    MoveMember(UserId, Option<ChannelId>),
    SetMute(UserId, bool),
}

#[derive(Default)]
struct State {
    channels: HashMap<ChannelId, String>,
    categories: HashMap<String, ChannelId>,
    voice: HashMap<UserId, MemberVoiceState>,
    calls: Vec<Call>,
    fail_create: Option<PlatformError>,
    fail_delete: Option<PlatformError>,
    fail_overwrite: Option<PlatformError>,
    fail_move: Option<PlatformError>,
    fail_category: Option<PlatformError>,
    fail_overwrite_for: HashMap<UserId, PlatformError>,
    /// Yield to the scheduler before every platform call
    yielding: bool,
}

/// In-memory platform that records every mutating call
pub struct MockPlatform {
    state: Mutex<State>,
    next_id: AtomicU64,
}

impl MockPlatform {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(State::default()),
            next_id: AtomicU64::new(1000),
        }
    }

    fn state(&self) -> std::sync::MutexGuard<'_, State> {
        self.state.lock().unwrap()
    }

    /// Suspension point standing in for a network round trip
    async fn round_trip(&self) {
        let yielding = self.state().yielding;
        if yielding {
            tokio::task::yield_now().await;
        }
    }

    /// Let concurrent callers interleave at every platform call
    pub fn set_yielding(&self) {
        self.state().yielding = true;
    }

    pub fn add_channel(&self, channel_id: ChannelId, name: &str) {
        self.state().channels.insert(channel_id, name.to_string());
    }

    pub fn remove_channel(&self, channel_id: ChannelId) {
        let mut state = self.state();
        state.channels.remove(&channel_id);
        state.voice.retain(|_, vs| vs.channel_id != channel_id);
    }

    pub fn add_category(&self, name: &str, id: ChannelId) {
        self.state().categories.insert(name.to_string(), id);
    }

    pub fn join(&self, user_id: UserId, channel_id: ChannelId) {
        self.state().voice.insert(
            user_id,
            MemberVoiceState {
                channel_id,
                muted: false,
            },
        );
    }

    pub fn leave(&self, user_id: UserId) {
        self.state().voice.remove(&user_id);
    }

    pub fn is_muted(&self, user_id: UserId) -> bool {
        self.state().voice.get(&user_id).map(|vs| vs.muted).unwrap_or(false)
    }

    pub fn fail_create(&self, err: PlatformError) {
        self.state().fail_create = Some(err);
    }

    pub fn fail_delete(&self, err: Option<PlatformError>) {
        self.state().fail_delete = err;
    }

    pub fn fail_overwrite(&self, err: PlatformError) {
        self.state().fail_overwrite = Some(err);
    }

    /// Fail overwrite changes for one member only
    pub fn fail_overwrite_for(&self, user_id: UserId, err: PlatformError) {
        self.state().fail_overwrite_for.insert(user_id, err);
    }

    pub fn fail_category(&self, err: PlatformError) {
        self.state().fail_category = Some(err);
    }

    pub fn fail_move(&self, err: PlatformError) {
        self.state().fail_move = Some(err);
    }

    pub fn calls(&self) -> Vec<Call> {
        self.state().calls.clone()
    }

    pub fn delete_calls(&self) -> usize {
        self.calls()
            .iter()
            .filter(|c| matches!(c, Call::DeleteChannel(_)))
            .count()
    }
}

impl Default for MockPlatform {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Platform for MockPlatform {
    async fn create_voice_channel(
        &self,
        _guild_id: GuildId,
        spec: VoiceChannelSpec,
    ) -> Result<ChannelId, PlatformError> {
        self.round_trip().await;
        let mut state = self.state();
        if let Some(err) = state.fail_create.clone() {
            return Err(err);
        }
        let id = ChannelId::new(self.next_id.fetch_add(1, Ordering::SeqCst));
        state.channels.insert(id, spec.name.clone());
        state.calls.push(Call::CreateVoiceChannel(spec));
        Ok(id)
    }

    async fn delete_channel(
        &self,
        channel_id: ChannelId,
        _reason: &str,
    ) -> Result<(), PlatformError> {
        self.round_trip().await;
        let mut state = self.state();
        state.calls.push(Call::DeleteChannel(channel_id));
        if let Some(err) = state.fail_delete.clone() {
            return Err(err);
        }
        match state.channels.remove(&channel_id) {
            Some(_) => Ok(()),
            None => Err(PlatformError::NotFound),
        }
    }

    async fn set_permission_overwrite(
        &self,
        channel_id: ChannelId,
        user_id: UserId,
        overwrite: Option<PermissionOverwrite>,
    ) -> Result<(), PlatformError> {
        self.round_trip().await;
        let mut state = self.state();
        if let Some(err) = state.fail_overwrite.clone() {
            return Err(err);
        }
        if let Some(err) = state.fail_overwrite_for.get(&user_id).cloned() {
            return Err(err);
        }
        state.calls.push(Call::SetOverwrite(channel_id, user_id, overwrite));
        Ok(())
    }

    async fn move_member(
        &self,
        _guild_id: GuildId,
        user_id: UserId,
        destination: Option<ChannelId>,
    ) -> Result<(), PlatformError> {
        self.round_trip().await;
        let mut state = self.state();
        if let Some(err) = state.fail_move.clone() {
            return Err(err);
        }
        state.calls.push(Call::MoveMember(user_id, destination));
        match destination {
            Some(channel_id) => {
                state.voice.insert(
                    user_id,
                    MemberVoiceState {
                        channel_id,
                        muted: false,
                    },
                );
            }
            None => {
                state.voice.remove(&user_id);
            }
        }
        Ok(())
    }

    async fn set_member_mute(
        &self,
        _guild_id: GuildId,
        user_id: UserId,
        mute: bool,
    ) -> Result<(), PlatformError> {
        self.round_trip().await;
        let mut state = self.state();
        state.calls.push(Call::SetMute(user_id, mute));
        if let Some(vs) = state.voice.get_mut(&user_id) {
            vs.muted = mute;
        }
        Ok(())
    }

    async fn resolve_or_create_category(
        &self,
        _guild_id: GuildId,
        name: &str,
        _reason: &str,
    ) -> Result<ChannelId, PlatformError> {
        self.round_trip().await;
        let mut state = self.state();
        if let Some(err) = state.fail_category.clone() {
            return Err(err);
        }
        if let Some(id) = state.categories.get(name) {
            return Ok(*id);
        }
        let id = ChannelId::new(self.next_id.fetch_add(1, Ordering::SeqCst));
        state.categories.insert(name.to_string(), id);
        state.calls.push(Call::CreateCategory(name.to_string()));
        Ok(id)
    }

    async fn resolve_channel(
        &self,
        guild_id: GuildId,
        channel_id: ChannelId,
    ) -> Result<ChannelSnapshot, PlatformError> {
        self.round_trip().await;
        let state = self.state();
        state
            .channels
            .get(&channel_id)
            .map(|name| ChannelSnapshot {
                id: channel_id,
                guild_id,
                name: name.clone(),
            })
            .ok_or(PlatformError::NotFound)
    }

    async fn list_channel_members(
        &self,
        _guild_id: GuildId,
        channel_id: ChannelId,
    ) -> Result<Vec<UserId>, PlatformError> {
        self.round_trip().await;
        let state = self.state();
        if !state.channels.contains_key(&channel_id) {
            return Err(PlatformError::NotFound);
        }
        let members: HashSet<UserId> = state
            .voice
            .iter()
            .filter(|(_, vs)| vs.channel_id == channel_id)
            .map(|(id, _)| *id)
            .collect();
        Ok(members.into_iter().collect())
    }

    fn voice_state(&self, _guild_id: GuildId, user_id: UserId) -> Option<MemberVoiceState> {
        self.state().voice.get(&user_id).copied()
    }
}
