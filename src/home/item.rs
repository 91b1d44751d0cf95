// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! A single controllable or readable item.
//!
//! Items are constructed during topology load and live until the
//! topology is discarded or reloaded; they are never removed
//! individually. Command methods check the item's type first, serialize
//! a typed [`Command`](crate::command::Command) and hand it to the
//! command sink. Some commands also update local state optimistically:
//! the server's event stream stays the source of truth, but immediate
//! feedback is desirable, and the next event or a rejected
//! acknowledgement corrects any divergence.

use crate::command::{
    Command, DimmerCommand, RegisterCommand, ShutterCommand, SmartShutterCommand, SwitchCommand,
    TextCommand, TimerCommand,
};
use crate::error::{DeviceError, Error, Result};
use crate::protocol::{CommandSink, Transport};
use crate::state::{ItemKind, ItemState};
use crate::types::Percent;

/// A Calaos item: light, sensor, shutter, register, timer, …
#[derive(Debug)]
pub struct Item<T: Transport> {
    id: String,
    name: String,
    kind: ItemKind,
    room: String,
    state: ItemState,
    sink: CommandSink<T>,
}

impl<T: Transport> Item<T> {
    pub(crate) fn new(
        id: String,
        name: String,
        kind: ItemKind,
        room: String,
        state: ItemState,
        sink: CommandSink<T>,
    ) -> Self {
        Self {
            id,
            name,
            kind,
            room,
            state,
            sink,
        }
    }

    /// Returns the server-assigned item ID.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Returns the human-readable name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the item's type.
    #[must_use]
    pub fn kind(&self) -> &ItemKind {
        &self.kind
    }

    /// Returns the name of the owning room.
    #[must_use]
    pub fn room(&self) -> &str {
        &self.room
    }

    /// Returns the last translated state.
    #[must_use]
    pub fn state(&self) -> &ItemState {
        &self.state
    }

    pub(crate) fn set_state_internal(&mut self, state: ItemState) {
        self.state = state;
    }

    // ========== Helpers ==========

    async fn send(&self, command: &impl Command) -> Result<()> {
        self.sink.set_state(&self.id, &command.raw()).await
    }

    fn expect_kind(&self, command: &'static str, allowed: &[ItemKind]) -> Result<()> {
        if allowed.contains(&self.kind) {
            Ok(())
        } else {
            Err(Error::Device(DeviceError::UnsupportedCommand {
                command,
                kind: self.kind.tag().to_string(),
            }))
        }
    }

    // ========== On/off ==========

    /// Turns the item on.
    ///
    /// Boolean outputs update local state immediately; dimmers do not,
    /// since the restored brightness is only known from the next event.
    ///
    /// # Errors
    ///
    /// Returns error if the item's type has no on/off commands or the
    /// send fails.
    pub async fn turn_on(&mut self) -> Result<()> {
        self.expect_kind(
            "true",
            &[
                ItemKind::InternalBool,
                ItemKind::OutputLight,
                ItemKind::OutputLightDimmer,
                ItemKind::Scenario,
            ],
        )?;
        self.send(&SwitchCommand::On).await?;
        if self.kind != ItemKind::OutputLightDimmer {
            self.state = ItemState::Bool(true);
        }
        Ok(())
    }

    /// Turns the item off.
    ///
    /// # Errors
    ///
    /// Returns error if the item's type has no on/off commands or the
    /// send fails.
    pub async fn turn_off(&mut self) -> Result<()> {
        self.expect_kind(
            "false",
            &[
                ItemKind::InternalBool,
                ItemKind::OutputLight,
                ItemKind::OutputLightDimmer,
                ItemKind::Scenario,
            ],
        )?;
        self.send(&SwitchCommand::Off).await?;
        if self.kind == ItemKind::OutputLightDimmer {
            self.state = ItemState::Percent(Percent::MIN);
        } else {
            self.state = ItemState::Bool(false);
        }
        Ok(())
    }

    /// Inverts the item's current state.
    ///
    /// Never updates local state: the outcome depends on the server-side
    /// state at arrival and is only known from the next event.
    ///
    /// # Errors
    ///
    /// Returns error if the item's type has no toggle command or the
    /// send fails.
    pub async fn toggle(&self) -> Result<()> {
        self.expect_kind(
            "toggle",
            &[
                ItemKind::InternalBool,
                ItemKind::OutputLight,
                ItemKind::OutputLightDimmer,
                ItemKind::OutputShutter,
                ItemKind::OutputShutterSmart,
            ],
        )?;
        match self.kind {
            ItemKind::OutputShutter => self.send(&ShutterCommand::Toggle).await,
            ItemKind::OutputShutterSmart => self.send(&SmartShutterCommand::Toggle).await,
            _ => self.send(&SwitchCommand::Toggle).await,
        }
    }

    /// Runs an on/off impulse pattern; each step is a duration in
    /// milliseconds. An empty pattern sends the bare `impulse` opcode.
    ///
    /// # Errors
    ///
    /// Returns error if the item's type has no impulse command or the
    /// send fails.
    pub async fn impulse(&self, pattern: &[u32]) -> Result<()> {
        self.expect_kind(
            "impulse",
            &[
                ItemKind::InternalBool,
                ItemKind::OutputLight,
                ItemKind::OutputLightDimmer,
            ],
        )?;
        self.send(&SwitchCommand::Impulse(pattern.to_vec())).await
    }

    // ========== Dimmer ==========

    /// Sets the brightness to an explicit target, clamped into [1, 100].
    ///
    /// Updates local state optimistically. Brightness 0 is not a valid
    /// target; use [`Item::turn_off`].
    ///
    /// # Errors
    ///
    /// Returns error if the item is not a dimmer or the send fails.
    pub async fn set_brightness(&mut self, value: i64) -> Result<()> {
        self.expect_kind("set", &[ItemKind::OutputLightDimmer])?;
        let target = Percent::clamped_target(value);
        self.send(&DimmerCommand::Set(target)).await?;
        self.state = ItemState::Percent(target);
        Ok(())
    }

    /// Stores the brightness without turning the light on.
    ///
    /// Local state is only updated if the light is currently on; when it
    /// is off, the stored value takes effect at the next turn-on.
    ///
    /// # Errors
    ///
    /// Returns error if the item is not a dimmer or the send fails.
    pub async fn set_brightness_off(&mut self, value: i64) -> Result<()> {
        self.expect_kind("set off", &[ItemKind::OutputLightDimmer])?;
        let target = Percent::clamped_target(value);
        self.send(&DimmerCommand::SetOff(target)).await?;
        if self.state != ItemState::Percent(Percent::MIN) {
            self.state = ItemState::Percent(target);
        }
        Ok(())
    }

    /// Raises the brightness. The effective magnitude is decided
    /// server-side, so local state is not updated.
    ///
    /// # Errors
    ///
    /// Returns error if the item is not a dimmer or the send fails.
    pub async fn brightness_up(&self, value: i64) -> Result<()> {
        self.expect_kind("up", &[ItemKind::OutputLightDimmer])?;
        self.send(&DimmerCommand::Up(Percent::clamped_target(value)))
            .await
    }

    /// Lowers the brightness. The effective magnitude is decided
    /// server-side, so local state is not updated.
    ///
    /// # Errors
    ///
    /// Returns error if the item is not a dimmer or the send fails.
    pub async fn brightness_down(&self, value: i64) -> Result<()> {
        self.expect_kind("down", &[ItemKind::OutputLightDimmer])?;
        self.send(&DimmerCommand::Down(Percent::clamped_target(value)))
            .await
    }

    /// Begins a press-and-hold brightness ramp.
    ///
    /// # Errors
    ///
    /// Returns error if the item is not a dimmer or the send fails.
    pub async fn hold_press(&self) -> Result<()> {
        self.expect_kind("hold press", &[ItemKind::OutputLightDimmer])?;
        self.send(&DimmerCommand::HoldPress).await
    }

    /// Ends a press-and-hold brightness ramp.
    ///
    /// # Errors
    ///
    /// Returns error if the item is not a dimmer or the send fails.
    pub async fn hold_stop(&self) -> Result<()> {
        self.expect_kind("hold stop", &[ItemKind::OutputLightDimmer])?;
        self.send(&DimmerCommand::HoldStop).await
    }

    // ========== Shutters ==========

    /// Opens the shutter.
    ///
    /// Without an amount the shutter moves until stopped. With an amount
    /// (position-aware shutters only) it moves by that percentage; an
    /// amount of `0` is treated as "until stopped", matching the server
    /// convention. Never updates local state.
    ///
    /// # Errors
    ///
    /// Returns error if the item is not a shutter, an amount is given
    /// for a basic shutter, or the send fails.
    pub async fn up(&self, amount: Option<i64>) -> Result<()> {
        self.expect_kind("up", &[ItemKind::OutputShutter, ItemKind::OutputShutterSmart])?;
        match (&self.kind, amount) {
            (ItemKind::OutputShutter, None) => self.send(&ShutterCommand::Up).await,
            (ItemKind::OutputShutter, Some(_)) => {
                Err(Error::Device(DeviceError::UnsupportedCommand {
                    command: "up <percent>",
                    kind: self.kind.tag().to_string(),
                }))
            }
            (_, None | Some(0)) => self.send(&SmartShutterCommand::Up(None)).await,
            (_, Some(value)) => {
                self.send(&SmartShutterCommand::Up(Some(Percent::clamped_target(value))))
                    .await
            }
        }
    }

    /// Closes the shutter. Same amount semantics as [`Item::up`].
    ///
    /// # Errors
    ///
    /// Returns error if the item is not a shutter, an amount is given
    /// for a basic shutter, or the send fails.
    pub async fn down(&self, amount: Option<i64>) -> Result<()> {
        self.expect_kind(
            "down",
            &[ItemKind::OutputShutter, ItemKind::OutputShutterSmart],
        )?;
        match (&self.kind, amount) {
            (ItemKind::OutputShutter, None) => self.send(&ShutterCommand::Down).await,
            (ItemKind::OutputShutter, Some(_)) => {
                Err(Error::Device(DeviceError::UnsupportedCommand {
                    command: "down <percent>",
                    kind: self.kind.tag().to_string(),
                }))
            }
            (_, None | Some(0)) => self.send(&SmartShutterCommand::Down(None)).await,
            (_, Some(value)) => {
                self.send(&SmartShutterCommand::Down(Some(Percent::clamped_target(
                    value,
                ))))
                .await
            }
        }
    }

    /// Stops the current motion or countdown.
    ///
    /// # Errors
    ///
    /// Returns error if the item is not a shutter or timer, or the send
    /// fails.
    pub async fn stop(&self) -> Result<()> {
        self.expect_kind(
            "stop",
            &[
                ItemKind::InputTimer,
                ItemKind::OutputShutter,
                ItemKind::OutputShutterSmart,
            ],
        )?;
        match self.kind {
            ItemKind::InputTimer => self.send(&TimerCommand::Stop).await,
            ItemKind::OutputShutter => self.send(&ShutterCommand::Stop).await,
            _ => self.send(&SmartShutterCommand::Stop).await,
        }
    }

    /// Moves a position-aware shutter to an absolute position, clamped
    /// into [1, 100]. The reached position is only known from the next
    /// event.
    ///
    /// # Errors
    ///
    /// Returns error if the item is not a position-aware shutter or the
    /// send fails.
    pub async fn set_position(&self, value: i64) -> Result<()> {
        self.expect_kind("set", &[ItemKind::OutputShutterSmart])?;
        self.send(&SmartShutterCommand::Set(Percent::clamped_target(value)))
            .await
    }

    /// Opens a position-aware shutter for a duration in milliseconds.
    ///
    /// # Errors
    ///
    /// Returns error if the item is not a position-aware shutter or the
    /// send fails.
    pub async fn impulse_up(&self, duration_ms: u32) -> Result<()> {
        self.expect_kind("impulse up", &[ItemKind::OutputShutterSmart])?;
        self.send(&SmartShutterCommand::ImpulseUp(duration_ms)).await
    }

    /// Closes a position-aware shutter for a duration in milliseconds.
    ///
    /// # Errors
    ///
    /// Returns error if the item is not a position-aware shutter or the
    /// send fails.
    pub async fn impulse_down(&self, duration_ms: u32) -> Result<()> {
        self.expect_kind("impulse down", &[ItemKind::OutputShutterSmart])?;
        self.send(&SmartShutterCommand::ImpulseDown(duration_ms))
            .await
    }

    /// Runs a full calibration cycle on a position-aware shutter.
    ///
    /// # Errors
    ///
    /// Returns error if the item is not a position-aware shutter or the
    /// send fails.
    pub async fn calibrate(&self) -> Result<()> {
        self.expect_kind("calibrate", &[ItemKind::OutputShutterSmart])?;
        self.send(&SmartShutterCommand::Calibrate).await
    }

    // ========== Registers ==========

    /// Sets an integer register, updating local state optimistically.
    ///
    /// # Errors
    ///
    /// Returns error if the item is not an integer register or the send
    /// fails.
    pub async fn set_value(&mut self, value: i64) -> Result<()> {
        self.expect_kind("set", &[ItemKind::InternalInt])?;
        self.send(&RegisterCommand::Set(value)).await?;
        self.state = ItemState::Int(value);
        Ok(())
    }

    /// Increments an integer register. A step of `0` requests the
    /// server's default step; the resulting value is only known from the
    /// next event.
    ///
    /// # Errors
    ///
    /// Returns error if the item is not an integer register or the send
    /// fails.
    pub async fn increment(&self, step: i64) -> Result<()> {
        self.expect_kind("inc", &[ItemKind::InternalInt])?;
        self.send(&RegisterCommand::Inc(step)).await
    }

    /// Decrements an integer register. Same step semantics as
    /// [`Item::increment`].
    ///
    /// # Errors
    ///
    /// Returns error if the item is not an integer register or the send
    /// fails.
    pub async fn decrement(&self, step: i64) -> Result<()> {
        self.expect_kind("dec", &[ItemKind::InternalInt])?;
        self.send(&RegisterCommand::Dec(step)).await
    }

    /// Sets a string register, updating local state optimistically.
    ///
    /// # Errors
    ///
    /// Returns error if the item is not a string register or the send
    /// fails.
    pub async fn set_text(&mut self, text: impl Into<String>) -> Result<()> {
        self.expect_kind("set", &[ItemKind::InternalString])?;
        let text = text.into();
        self.send(&TextCommand(text.clone())).await?;
        self.state = ItemState::Text(text);
        Ok(())
    }

    // ========== Timer ==========

    /// Starts a countdown timer.
    ///
    /// # Errors
    ///
    /// Returns error if the item is not a timer or the send fails.
    pub async fn start(&self) -> Result<()> {
        self.expect_kind("start", &[ItemKind::InputTimer])?;
        self.send(&TimerCommand::Start).await
    }

    /// Reprograms a countdown timer's duration.
    ///
    /// # Errors
    ///
    /// Returns error if the item is not a timer or the send fails.
    pub async fn reset(&self, hours: u32, minutes: u32, seconds: u32, milliseconds: u32) -> Result<()> {
        self.expect_kind("reset", &[ItemKind::InputTimer])?;
        self.send(&TimerCommand::Reset {
            hours,
            minutes,
            seconds,
            milliseconds,
        })
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::testing::RecordingTransport;
    use std::sync::Arc;

    fn item(kind: ItemKind, state: ItemState) -> (Arc<RecordingTransport>, Item<RecordingTransport>) {
        let transport = Arc::new(RecordingTransport::new());
        let item = Item::new(
            "item_0".to_string(),
            "Test item".to_string(),
            kind,
            "Test room".to_string(),
            state,
            CommandSink::new(Arc::clone(&transport)),
        );
        (transport, item)
    }

    fn value_of(frame: &str) -> String {
        let parsed: serde_json::Value = serde_json::from_str(frame).unwrap();
        parsed["data"]["value"].as_str().unwrap().to_string()
    }

    #[tokio::test]
    async fn light_on_is_optimistic() {
        let (transport, mut item) = item(ItemKind::OutputLight, ItemState::Bool(false));
        item.turn_on().await.unwrap();
        assert_eq!(item.state(), &ItemState::Bool(true));
        assert_eq!(value_of(&transport.sent().await[0]), "true");
    }

    #[tokio::test]
    async fn toggle_is_not_optimistic() {
        let (transport, item) = item(ItemKind::OutputLight, ItemState::Bool(false));
        item.toggle().await.unwrap();
        assert_eq!(item.state(), &ItemState::Bool(false));
        assert_eq!(value_of(&transport.sent().await[0]), "toggle");
    }

    #[tokio::test]
    async fn dimmer_on_is_not_optimistic() {
        let (_, mut item) = item(
            ItemKind::OutputLightDimmer,
            ItemState::Percent(Percent::MIN),
        );
        item.turn_on().await.unwrap();
        // Restored brightness is unknown until the next event
        assert_eq!(item.state(), &ItemState::Percent(Percent::MIN));
    }

    #[tokio::test]
    async fn dimmer_off_zeroes_brightness() {
        let (transport, mut item) = item(
            ItemKind::OutputLightDimmer,
            ItemState::Percent(Percent::clamped(80)),
        );
        item.turn_off().await.unwrap();
        assert_eq!(item.state(), &ItemState::Percent(Percent::MIN));
        assert_eq!(value_of(&transport.sent().await[0]), "false");
    }

    #[tokio::test]
    async fn dimmer_set_clamps_and_updates() {
        let (transport, mut item) = item(
            ItemKind::OutputLightDimmer,
            ItemState::Percent(Percent::clamped(10)),
        );
        item.set_brightness(150).await.unwrap();
        assert_eq!(item.state(), &ItemState::Percent(Percent::MAX));
        assert_eq!(value_of(&transport.sent().await[0]), "set 100");
    }

    #[tokio::test]
    async fn dimmer_up_is_not_optimistic() {
        let (transport, item) = item(
            ItemKind::OutputLightDimmer,
            ItemState::Percent(Percent::clamped(10)),
        );
        item.brightness_up(10).await.unwrap();
        assert_eq!(item.state(), &ItemState::Percent(Percent::clamped(10)));
        assert_eq!(value_of(&transport.sent().await[0]), "up 10");
    }

    #[tokio::test]
    async fn dimmer_set_off_only_updates_when_on() {
        let (_, mut item) = item(
            ItemKind::OutputLightDimmer,
            ItemState::Percent(Percent::MIN),
        );
        item.set_brightness_off(40).await.unwrap();
        // Light is off, stored value takes effect at the next turn-on
        assert_eq!(item.state(), &ItemState::Percent(Percent::MIN));

        let (_, mut item) = item_on(40);
        item.set_brightness_off(70).await.unwrap();
        assert_eq!(item.state(), &ItemState::Percent(Percent::clamped(70)));
    }

    fn item_on(level: i64) -> (Arc<RecordingTransport>, Item<RecordingTransport>) {
        item(
            ItemKind::OutputLightDimmer,
            ItemState::Percent(Percent::clamped(level)),
        )
    }

    #[tokio::test]
    async fn smart_shutter_zero_amount_moves_until_stopped() {
        let (transport, item) = item(
            ItemKind::OutputShutterSmart,
            ItemState::Shutter(crate::types::ShutterState::default()),
        );
        item.up(None).await.unwrap();
        item.up(Some(0)).await.unwrap();
        item.up(Some(30)).await.unwrap();
        let sent = transport.sent().await;
        assert_eq!(value_of(&sent[0]), "up");
        assert_eq!(value_of(&sent[1]), "up");
        assert_eq!(value_of(&sent[2]), "up 30");
    }

    #[tokio::test]
    async fn basic_shutter_rejects_amount() {
        let (_, item) = item(ItemKind::OutputShutter, ItemState::Bool(false));
        item.up(None).await.unwrap();
        let err = item.up(Some(30)).await.unwrap_err();
        assert!(matches!(err, Error::Device(_)));
    }

    #[tokio::test]
    async fn register_zero_step_is_default_step() {
        let (transport, item) = item(ItemKind::InternalInt, ItemState::Int(5));
        item.increment(0).await.unwrap();
        item.increment(3).await.unwrap();
        item.decrement(0).await.unwrap();
        let sent = transport.sent().await;
        assert_eq!(value_of(&sent[0]), "inc");
        assert_eq!(value_of(&sent[1]), "inc 3");
        assert_eq!(value_of(&sent[2]), "dec");
    }

    #[tokio::test]
    async fn register_set_is_optimistic() {
        let (_, mut item) = item(ItemKind::InternalInt, ItemState::Int(5));
        item.set_value(42).await.unwrap();
        assert_eq!(item.state(), &ItemState::Int(42));
    }

    #[tokio::test]
    async fn text_register_set_is_optimistic() {
        let (transport, mut item) = item(ItemKind::InternalString, ItemState::Text(String::new()));
        item.set_text("hello").await.unwrap();
        assert_eq!(item.state(), &ItemState::Text("hello".to_string()));
        assert_eq!(value_of(&transport.sent().await[0]), "hello");
    }

    #[tokio::test]
    async fn timer_commands() {
        let (transport, item) = item(ItemKind::InputTimer, ItemState::Bool(false));
        item.start().await.unwrap();
        item.reset(0, 5, 30, 0).await.unwrap();
        item.stop().await.unwrap();
        let sent = transport.sent().await;
        assert_eq!(value_of(&sent[0]), "start");
        assert_eq!(value_of(&sent[1]), "0:5:30:0");
        assert_eq!(value_of(&sent[2]), "stop");
    }

    #[tokio::test]
    async fn sensor_rejects_commands() {
        let (_, mut item) = item(ItemKind::InputTemp, ItemState::Float(20.0));
        assert!(matches!(item.turn_on().await, Err(Error::Device(_))));
        assert!(matches!(item.toggle().await, Err(Error::Device(_))));
        assert!(matches!(item.set_brightness(50).await, Err(Error::Device(_))));
    }

    #[tokio::test]
    async fn unknown_kind_rejects_commands() {
        let (_, mut item) = item(
            ItemKind::Unknown("FutureGadget".to_string()),
            ItemState::Text("x".to_string()),
        );
        let err = item.turn_on().await.unwrap_err();
        assert_eq!(
            err.to_string(),
            "device error: item type FutureGadget does not support true"
        );
    }
}
