use std::time::Duration;

/// Distance from the target under which a spring counts as settled.
pub const REST_EPSILON: f64 = 0.001;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpringParams {
    pub damping: f64,
    pub mass: f64,
    pub stiffness: f64,
    pub epsilon: f64,
}

#[derive(Debug, Clone, Copy)]
pub struct Spring {
    pub from: f64,
    pub to: f64,
    pub initial_velocity: f64,
    pub params: SpringParams,
}

impl SpringParams {
    pub fn new(damping_ratio: f64, stiffness: f64, epsilon: f64) -> Self {
        let damping_ratio = damping_ratio.max(0.);
        let stiffness = stiffness.max(0.);
        let mass = 1.;
        let critical_damping = 2. * (mass * stiffness).sqrt();

        Self {
            damping: damping_ratio * critical_damping,
            mass,
            stiffness,
            epsilon: epsilon.max(0.),
        }
    }

    /// Converts the tension/friction pair of the Origami spring model.
    ///
    /// Uses the same mapping as mobile toolkits that expose `{tension, friction}`, so that a
    /// tension of 30 and friction of 7 feel the same here as there.
    pub fn from_tension_friction(tension: f64, friction: f64, epsilon: f64) -> Self {
        let stiffness = (tension - 30.) * 3.62 + 194.;
        let damping = (friction - 8.) * 3. + 25.;

        Self {
            damping: damping.max(0.),
            mass: 1.,
            stiffness: stiffness.max(0.),
            epsilon: epsilon.max(0.),
        }
    }

    fn beta(&self) -> f64 {
        self.damping / (2. * self.mass)
    }

    fn omega0(&self) -> f64 {
        (self.stiffness / self.mass).sqrt()
    }
}

impl Spring {
    pub fn value_at(&self, t: Duration) -> f64 {
        self.oscillate(t.as_secs_f64())
    }

    /// Time until the spring comes to rest within `epsilon` of `to`.
    // Based on libadwaita (LGPL-2.1-or-later) and RBBAnimation (MIT).
    pub fn duration(&self) -> Duration {
        const DELTA: f64 = 0.001;

        let beta = self.params.beta();
        if beta.abs() <= f64::EPSILON || beta < 0. {
            return Duration::MAX;
        }

        if (self.to - self.from).abs() <= f64::EPSILON {
            return Duration::ZERO;
        }

        let omega0 = self.params.omega0();

        // The envelope bounds critically damped and underdamped springs.
        let mut x0 = -self.params.epsilon.ln() / beta;
        if (beta - omega0).abs() <= f64::from(f32::EPSILON) || beta < omega0 {
            return Duration::from_secs_f64(x0);
        }

        // Overdamped: Newton's method on the curve itself.
        let mut y0 = self.oscillate(x0);
        let m = (self.oscillate(x0 + DELTA) - y0) / DELTA;
        let mut x1 = (self.to - y0 + m * x0) / m;
        let mut y1 = self.oscillate(x1);

        let mut i = 0;
        while (self.to - y1).abs() > self.params.epsilon {
            if i > 1000 {
                return Duration::ZERO;
            }

            x0 = x1;
            y0 = y1;

            let m = (self.oscillate(x0 + DELTA) - y0) / DELTA;
            x1 = (self.to - y0 + m * x0) / m;
            y1 = self.oscillate(x1);

            if !y1.is_finite() {
                return Duration::from_secs_f64(x0);
            }

            i += 1;
        }

        Duration::from_secs_f64(x1)
    }

    /// Position at `t` seconds.
    fn oscillate(&self, t: f64) -> f64 {
        let beta = self.params.beta();
        let omega0 = self.params.omega0();
        let v0 = self.initial_velocity;
        let x0 = self.from - self.to;

        let envelope = (-beta * t).exp();

        if (beta - omega0).abs() <= f64::from(f32::EPSILON) {
            // Critically damped.
            self.to + envelope * (x0 + (beta * x0 + v0) * t)
        } else if beta < omega0 {
            // Underdamped.
            let omega1 = ((omega0 * omega0) - (beta * beta)).sqrt();
            self.to
                + envelope
                    * (x0 * (omega1 * t).cos() + ((beta * x0 + v0) / omega1) * (omega1 * t).sin())
        } else {
            // Overdamped.
            let omega2 = ((beta * beta) - (omega0 * omega0)).sqrt();
            self.to
                + envelope
                    * (x0 * (omega2 * t).cosh() + ((beta * x0 + v0) / omega2) * (omega2 * t).sinh())
        }
    }
}
