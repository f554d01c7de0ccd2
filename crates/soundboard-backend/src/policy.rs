/// Decides whether a loaded clip is actually played.
///
/// Sent sounds and locally triggered sounds are gated independently by the
/// "play send sounds" preference: with it off only local sounds play, with it
/// on only sent ones do. Muting overrides everything.
pub fn should_play(muted: bool, play_send_sounds: bool, is_sent_sound: bool) -> bool {
    if muted {
        return false;
    }
    play_send_sounds == is_sent_sound
}
