//! End-to-end scenarios: a mounted scene driven frame by frame.

use login_monsters::character::{MouthVariant, PoseState};
use login_monsters::form::{Field, LoginForm};
use login_monsters::state::input::FormKey;
use login_monsters::state::pointer::{PointerEvent, dispatch, listener_count, reset_pointer_state};
use login_monsters::{Bounds, Point, ReactiveFlags, Scene, SceneConfig, SceneHandle, render_svg};
use spark_signals::signal;

const DT: f32 = 1.0 / 60.0;

fn setup(flags: ReactiveFlags) -> SceneHandle {
    reset_pointer_state();
    let handle = Scene::new(&SceneConfig::default(), flags.into()).unwrap().mount();
    handle.set_bounds(Some(Bounds::new(0.0, 0.0, 400.0, 400.0)));
    handle
}

fn run(handle: &mut SceneHandle, seconds: f32) {
    let frames = (seconds / DT).round() as usize;
    for _ in 0..frames {
        handle.tick(DT);
    }
}

fn close(a: Point, b: Point) -> bool {
    a.distance(b) < 0.05
}

#[test]
fn test_centered_cursor_idles() {
    let mut handle = setup(ReactiveFlags::empty());
    dispatch(PointerEvent::new(200.0, 200.0));
    run(&mut handle, 2.0);

    let frame = handle.frame();
    for (pose, character) in frame.characters.iter().zip(handle.scene().characters()) {
        assert_eq!(pose.state, PoseState::Idle, "{}", pose.name);
        assert_eq!(pose.mouth.variant, MouthVariant::SmileCurve, "{}", pose.name);
        assert!(pose.lean.abs() < 0.01, "{} leans {}", pose.name, pose.lean);
        assert!(character.is_settled(), "{} still moving", pose.name);
        if character.config().profile.is_none() {
            assert!(close(pose.face_offset, character.face_target()), "{}", pose.name);
        }
    }
}

#[test]
fn test_focus_leans_and_listens() {
    let mut handle = setup(ReactiveFlags::FORM_FOCUSED);
    run(&mut handle, 1.0);

    let frame = handle.frame();
    let leans: Vec<f32> = frame.characters.iter().map(|pose| pose.lean).collect();
    for (lean, expected) in leans.iter().zip([-8.0, -8.0, -3.0, -5.0]) {
        assert!((lean - expected).abs() < 0.01, "{leans:?}");
    }

    let mouths: Vec<MouthVariant> = frame.characters.iter().map(|pose| pose.mouth.variant).collect();
    assert_eq!(
        mouths,
        [
            MouthVariant::VerticalBar,
            MouthVariant::VerticalBar,
            MouthVariant::AttentiveDot,
            MouthVariant::AttentiveDot,
        ]
    );
}

#[test]
fn test_password_visible_averts_regardless_of_cursor() {
    for (x, y) in [(0.0, 0.0), (400.0, 400.0), (400.0, 0.0)] {
        let mut handle = setup(ReactiveFlags::PASSWORD_VISIBLE);
        dispatch(PointerEvent::new(x, y));
        run(&mut handle, 3.0);

        let frame = handle.frame();
        for pose in &frame.characters[..2] {
            let averted = handle.scene().character(&pose.name).unwrap().config().averted.pupil;
            for eye in &pose.eyes {
                assert!(
                    close(eye.pupil_offset, averted),
                    "{} pupil {:?} with cursor at ({x}, {y})",
                    pose.name,
                    eye.pupil_offset
                );
            }
        }
    }
}

#[test]
fn test_password_overrides_focus() {
    let mut handle = setup(ReactiveFlags::FORM_FOCUSED | ReactiveFlags::PASSWORD_VISIBLE);
    run(&mut handle, 2.0);

    for pose in &handle.frame().characters {
        assert_eq!(pose.state, PoseState::Averted, "{}", pose.name);
        assert_eq!(pose.mouth.variant, MouthVariant::SmallCircle, "{}", pose.name);
        assert!(pose.lean.abs() < 0.01, "{} leans {}", pose.name, pose.lean);
    }
}

#[test]
fn test_flags_change_mid_flight() {
    reset_pointer_state();
    let flags = signal(ReactiveFlags::empty());
    let mut handle = Scene::new(&SceneConfig::default(), flags.clone().into())
        .unwrap()
        .mount();

    flags.set(ReactiveFlags::FORM_FOCUSED);
    run(&mut handle, 1.0);
    assert!((handle.frame().characters[0].lean + 8.0).abs() < 0.01);

    flags.set(ReactiveFlags::empty());
    run(&mut handle, 1.0);
    assert!(handle.frame().characters[0].lean.abs() < 0.01);
}

#[test]
fn test_form_drives_scene() {
    reset_pointer_state();
    let form = LoginForm::new();
    let mut handle = Scene::new(&SceneConfig::default(), form.flags()).unwrap().mount();

    form.handle_key(FormKey::Tab);
    assert_eq!(form.focused(), Some(Field::Username));
    handle.tick(DT);
    assert_eq!(handle.frame().characters[0].state, PoseState::Attentive);

    form.handle_key(FormKey::TogglePassword);
    handle.tick(DT);
    assert_eq!(handle.frame().characters[0].state, PoseState::Averted);
}

#[test]
fn test_svg_of_settled_scene() {
    let mut handle = setup(ReactiveFlags::FORM_FOCUSED);
    run(&mut handle, 1.0);
    let svg = render_svg(&handle.frame());

    assert!(svg.starts_with("<svg "));
    assert_eq!(svg.matches("<g ").count(), 8);
    assert!(!svg.contains("opacity="));
    assert!(svg.contains("skewX(-8)"));
    assert!(svg.contains("skewX(-5)"));
}

#[test]
fn test_cast_fades_in_after_mount() {
    let mut handle = setup(ReactiveFlags::empty());
    let svg = render_svg(&handle.frame());
    assert_eq!(svg.matches(r#"opacity="0""#).count(), 4);

    run(&mut handle, 0.5);
    let frame = handle.frame();
    let opacity: Vec<f32> = frame.characters.iter().map(|pose| pose.entrance.opacity).collect();
    assert!(opacity.windows(2).all(|w| w[0] > w[1]), "{opacity:?}");
    assert!(handle.scene().is_entering());

    run(&mut handle, 0.5);
    assert!(!handle.scene().is_entering());
    assert!(handle.frame().characters.iter().all(|pose| pose.entrance.is_settled()));
}

#[test]
fn test_unmount_stops_tracking() {
    let handle = setup(ReactiveFlags::empty());
    assert_eq!(listener_count(), 1);

    let scene = handle.unmount();
    assert_eq!(listener_count(), 0);

    let before = scene.cursor().position();
    dispatch(PointerEvent::new(10.0, 10.0));
    assert_eq!(scene.cursor().position(), before);
}
