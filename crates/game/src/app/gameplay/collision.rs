use super::body::{Ground, PlayerBody};

/// Clamps the body onto the ground surface. Vertical only; horizontal motion
/// is never blocked. Returns whether a clamp happened.
pub(crate) fn resolve_ground(body: &mut PlayerBody, ground: &Ground) -> bool {
    if !ground.supports(body) {
        return false;
    }
    body.y = ground.surface_y() - body.height();
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::gameplay::body::PlayerTuning;

    fn setup() -> (PlayerBody, Ground) {
        let ground = Ground::new(400.0, 50.0, 2400.0);
        (PlayerBody::spawn(PlayerTuning::default(), &ground), ground)
    }

    #[test]
    fn body_below_surface_is_lifted_onto_it() {
        let (mut body, ground) = setup();
        body.y = 337.5;
        assert!(resolve_ground(&mut body, &ground));
        assert_eq!(body.y, 300.0);
        assert_eq!(body.bottom(), ground.surface_y());
    }

    #[test]
    fn body_exactly_on_surface_stays_put() {
        let (mut body, ground) = setup();
        assert!(resolve_ground(&mut body, &ground));
        assert_eq!(body.y, 300.0);
    }

    #[test]
    fn airborne_body_is_untouched() {
        let (mut body, ground) = setup();
        body.y = 120.0;
        body.x = -40.0;
        assert!(!resolve_ground(&mut body, &ground));
        assert_eq!(body.y, 120.0);
        assert_eq!(body.x, -40.0);
    }
}
